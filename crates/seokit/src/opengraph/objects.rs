//! Type-specific Open Graph fields (`article:*`, `profile:*`, `book:*`,
//! `music:*`, `video:*`).
//!
//! Every struct lists its fields as optional; only non-empty ones become
//! properties.

use crate::property_map::PropertyValue;

type Props = Vec<(&'static str, PropertyValue)>;

#[derive(Debug, Clone, Default)]
pub struct Article {
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub expiration_time: Option<String>,
    pub authors: Vec<String>,
    pub section: Option<String>,
    pub tags: Vec<String>,
}

impl Article {
    pub(crate) fn properties(&self) -> Props {
        let mut p = Props::new();
        text(&mut p, "article:published_time", &self.published_time);
        text(&mut p, "article:modified_time", &self.modified_time);
        text(&mut p, "article:expiration_time", &self.expiration_time);
        list(&mut p, "article:author", &self.authors);
        text(&mut p, "article:section", &self.section);
        list(&mut p, "article:tag", &self.tags);
        p
    }
}

#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    /// Only `male` and `female` are written.
    pub gender: Option<String>,
}

impl Profile {
    pub(crate) fn properties(&self) -> Props {
        let mut p = Props::new();
        text(&mut p, "profile:first_name", &self.first_name);
        text(&mut p, "profile:last_name", &self.last_name);
        text(&mut p, "profile:username", &self.username);
        let gender = self
            .gender
            .clone()
            .filter(|g| g == "male" || g == "female");
        text(&mut p, "profile:gender", &gender);
        p
    }
}

#[derive(Debug, Clone, Default)]
pub struct Book {
    pub authors: Vec<String>,
    pub isbn: Option<String>,
    pub release_date: Option<String>,
    pub tags: Vec<String>,
}

impl Book {
    pub(crate) fn properties(&self) -> Props {
        let mut p = Props::new();
        list(&mut p, "book:author", &self.authors);
        text(&mut p, "book:isbn", &self.isbn);
        text(&mut p, "book:release_date", &self.release_date);
        list(&mut p, "book:tag", &self.tags);
        p
    }
}

#[derive(Debug, Clone, Default)]
pub struct MusicSong {
    /// Length in seconds.
    pub duration: Option<u32>,
    pub albums: Vec<String>,
    pub album_disc: Option<u32>,
    pub album_track: Option<u32>,
    pub musicians: Vec<String>,
}

impl MusicSong {
    pub(crate) fn properties(&self) -> Props {
        let mut p = Props::new();
        number(&mut p, "music:duration", self.duration);
        list(&mut p, "music:album", &self.albums);
        number(&mut p, "music:album:disc", self.album_disc);
        number(&mut p, "music:album:track", self.album_track);
        list(&mut p, "music:musician", &self.musicians);
        p
    }
}

#[derive(Debug, Clone, Default)]
pub struct MusicAlbum {
    pub songs: Vec<String>,
    pub song_disc: Option<u32>,
    pub song_track: Option<u32>,
    pub musicians: Vec<String>,
    pub release_date: Option<String>,
}

impl MusicAlbum {
    pub(crate) fn properties(&self) -> Props {
        let mut p = Props::new();
        list(&mut p, "music:song", &self.songs);
        number(&mut p, "music:song:disc", self.song_disc);
        number(&mut p, "music:song:track", self.song_track);
        list(&mut p, "music:musician", &self.musicians);
        text(&mut p, "music:release_date", &self.release_date);
        p
    }
}

#[derive(Debug, Clone, Default)]
pub struct MusicPlaylist {
    pub songs: Vec<String>,
    pub creators: Vec<String>,
}

impl MusicPlaylist {
    pub(crate) fn properties(&self) -> Props {
        let mut p = Props::new();
        list(&mut p, "music:song", &self.songs);
        list(&mut p, "music:creator", &self.creators);
        p
    }
}

#[derive(Debug, Clone, Default)]
pub struct MusicRadioStation {
    pub creators: Vec<String>,
}

impl MusicRadioStation {
    pub(crate) fn properties(&self) -> Props {
        let mut p = Props::new();
        list(&mut p, "music:creator", &self.creators);
        p
    }
}

/// Fields shared by `video.movie`, `video.episode`, `video.tv_show` and `video.other`.
#[derive(Debug, Clone, Default)]
pub struct Video {
    pub actors: Vec<String>,
    pub actor_roles: Vec<String>,
    pub directors: Vec<String>,
    pub writers: Vec<String>,
    /// Length in seconds.
    pub duration: Option<u32>,
    pub release_date: Option<String>,
    pub tags: Vec<String>,
    /// Only meaningful for `video.episode`.
    pub series: Option<String>,
}

impl Video {
    pub(crate) fn properties(&self) -> Props {
        let mut p = Props::new();
        list(&mut p, "video:actor", &self.actors);
        list(&mut p, "video:actor:role", &self.actor_roles);
        list(&mut p, "video:director", &self.directors);
        list(&mut p, "video:writer", &self.writers);
        number(&mut p, "video:duration", self.duration);
        text(&mut p, "video:release_date", &self.release_date);
        list(&mut p, "video:tag", &self.tags);
        text(&mut p, "video:series", &self.series);
        p
    }
}

fn text(p: &mut Props, key: &'static str, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
        p.push((key, PropertyValue::One(v.to_string())));
    }
}

fn number(p: &mut Props, key: &'static str, value: Option<u32>) {
    if let Some(v) = value.filter(|v| *v > 0) {
        p.push((key, PropertyValue::One(v.to_string())));
    }
}

fn list(p: &mut Props, key: &'static str, values: &[String]) {
    let values: Vec<String> = values.iter().filter(|v| !v.is_empty()).cloned().collect();
    match values.len() {
        0 => {}
        1 => p.push((key, PropertyValue::One(values[0].clone()))),
        _ => p.push((key, PropertyValue::Many(values))),
    }
}
