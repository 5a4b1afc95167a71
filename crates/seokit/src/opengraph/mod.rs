//! Open Graph protocol tags (`<meta property="og:…">`).

mod media;
mod objects;

pub use media::{OgAudio, OgImage, OgVideo};
pub use objects::{
    Article, Book, MusicAlbum, MusicPlaylist, MusicRadioStation, MusicSong, Profile, Video,
};

use crate::config::{SeoConfig, UrlPolicy};
use crate::property_map::{PropertyMap, PropertyValue};
use crate::request::PageRequest;
use crate::support::{join_lines, meta_property_tag};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The Open Graph object types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OpenGraphType {
    #[default]
    Website,
    Article,
    Book,
    Profile,
    MusicSong,
    MusicAlbum,
    MusicPlaylist,
    MusicRadioStation,
    VideoMovie,
    VideoEpisode,
    VideoTvShow,
    VideoOther,
}

impl OpenGraphType {
    pub const ALL: [Self; 12] = [
        Self::Website,
        Self::Article,
        Self::Book,
        Self::Profile,
        Self::MusicSong,
        Self::MusicAlbum,
        Self::MusicPlaylist,
        Self::MusicRadioStation,
        Self::VideoMovie,
        Self::VideoEpisode,
        Self::VideoTvShow,
        Self::VideoOther,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Article => "article",
            Self::Book => "book",
            Self::Profile => "profile",
            Self::MusicSong => "music.song",
            Self::MusicAlbum => "music.album",
            Self::MusicPlaylist => "music.playlist",
            Self::MusicRadioStation => "music.radio_station",
            Self::VideoMovie => "video.movie",
            Self::VideoEpisode => "video.episode",
            Self::VideoTvShow => "video.tv_show",
            Self::VideoOther => "video.other",
        }
    }

    /// Parse a type name, falling back to `website` for anything unknown.
    pub fn coerce(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            debug!("unknown og:type {value:?}, using website");
            Self::Website
        })
    }
}

impl FromStr for OpenGraphType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

impl fmt::Display for OpenGraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values accepted by `og:determiner`.
const DETERMINERS: &[&str] = &["a", "an", "the", "", "auto"];

/// Snapshot of everything an [`OpenGraph`] builder holds.
#[derive(Debug, Clone, Serialize)]
pub struct OpenGraphMap {
    pub properties: PropertyMap,
    pub images: Vec<OgImage>,
    pub videos: Vec<OgVideo>,
    pub audios: Vec<OgAudio>,
}

/// Builder for Open Graph properties and media records.
#[derive(Debug, Clone, Default)]
pub struct OpenGraph {
    properties: PropertyMap,
    images: Vec<OgImage>,
    videos: Vec<OgVideo>,
    audios: Vec<OgAudio>,
}

impl OpenGraph {
    /// An empty builder with no defaults.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build with configured defaults applied for `request`.
    pub fn new(config: &SeoConfig, request: Option<&PageRequest>) -> Self {
        let mut og = Self::default();
        let defaults = &config.opengraph.defaults;

        og.set_type(&defaults.og_type);
        og.site_name(defaults.site_name.as_deref().unwrap_or(&config.app.name));
        og.locale(defaults.locale.as_deref().unwrap_or(&config.app.locale));

        if let Some(req) = request {
            match defaults.url {
                UrlPolicy::Current => {
                    og.url(&req.current_url());
                }
                UrlPolicy::Full => {
                    og.url(&req.full_url());
                }
                UrlPolicy::Disabled => {}
            }
        }

        if let Some(title) = &defaults.title {
            og.title(title);
        }
        if let Some(description) = &defaults.description {
            og.description(description);
        }
        if let Some(url) = defaults.image.as_deref().filter(|u| !u.is_empty()) {
            og.add_image(OgImage {
                url: url.to_string(),
                secure_url: defaults.image_secure_url.clone(),
                mime_type: defaults.image_type.clone(),
                width: defaults.image_width,
                height: defaults.image_height,
                alt: defaults.image_alt.clone(),
            });
        }

        og
    }

    pub fn add(&mut self, property: &str, value: impl ToString) -> &mut Self {
        self.properties.insert(property, value.to_string());
        self
    }

    /// Store a repeated property; renders one tag per value.
    pub fn add_many<I, S>(&mut self, property: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if !values.is_empty() {
            self.properties.insert(property, PropertyValue::Many(values));
        }
        self
    }

    pub fn add_when(&mut self, condition: bool, property: &str, value: impl ToString) -> &mut Self {
        if condition {
            self.add(property, value);
        }
        self
    }

    pub fn remove(&mut self, property: &str) -> &mut Self {
        self.properties.remove(property);
        self
    }

    pub fn has(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn get(&self, property: &str) -> Option<&PropertyValue> {
        self.properties.get(property)
    }

    /// Set `og:type`; unknown names become `website`.
    pub fn set_type(&mut self, og_type: &str) -> &mut Self {
        self.set_object_type(OpenGraphType::coerce(og_type))
    }

    pub fn set_object_type(&mut self, og_type: OpenGraphType) -> &mut Self {
        self.add("og:type", og_type.as_str())
    }

    pub fn url(&mut self, url: &str) -> &mut Self {
        self.add("og:url", url)
    }

    pub fn title(&mut self, title: &str) -> &mut Self {
        self.add("og:title", title)
    }

    pub fn description(&mut self, description: &str) -> &mut Self {
        self.add("og:description", description)
    }

    pub fn site_name(&mut self, name: &str) -> &mut Self {
        self.add("og:site_name", name)
    }

    pub fn locale(&mut self, locale: &str) -> &mut Self {
        self.add("og:locale", locale)
    }

    /// Set `og:locale:alternate`; an empty list writes nothing.
    pub fn locale_alternates<I, S>(&mut self, locales: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.add_many("og:locale:alternate", locales)
    }

    /// Set `og:determiner`; values outside `a`, `an`, `the`, `""`, `auto` are ignored.
    pub fn determiner(&mut self, determiner: &str) -> &mut Self {
        if DETERMINERS.contains(&determiner) {
            self.add("og:determiner", determiner);
        } else {
            debug!("ignoring invalid og:determiner {determiner:?}");
        }
        self
    }

    pub fn add_image(&mut self, image: OgImage) -> &mut Self {
        self.images.push(image);
        self
    }

    /// Shorthand for an image with only a URL.
    pub fn image(&mut self, url: &str) -> &mut Self {
        self.add_image(OgImage::new(url))
    }

    /// Replace the first image record, or add one when there is none.
    pub fn primary_image(&mut self, url: &str) -> &mut Self {
        match self.images.first_mut() {
            Some(first) => *first = OgImage::new(url),
            None => self.images.push(OgImage::new(url)),
        }
        self
    }

    pub fn add_video(&mut self, video: OgVideo) -> &mut Self {
        self.videos.push(video);
        self
    }

    pub fn add_audio(&mut self, audio: OgAudio) -> &mut Self {
        self.audios.push(audio);
        self
    }

    pub fn images(&self) -> &[OgImage] {
        &self.images
    }

    pub fn videos(&self) -> &[OgVideo] {
        &self.videos
    }

    pub fn audios(&self) -> &[OgAudio] {
        &self.audios
    }

    pub fn article(&mut self, article: Article) -> &mut Self {
        self.set_object_type(OpenGraphType::Article);
        self.extend(article.properties())
    }

    pub fn profile(&mut self, profile: Profile) -> &mut Self {
        self.set_object_type(OpenGraphType::Profile);
        self.extend(profile.properties())
    }

    pub fn book(&mut self, book: Book) -> &mut Self {
        self.set_object_type(OpenGraphType::Book);
        self.extend(book.properties())
    }

    pub fn music_song(&mut self, song: MusicSong) -> &mut Self {
        self.set_object_type(OpenGraphType::MusicSong);
        self.extend(song.properties())
    }

    pub fn music_album(&mut self, album: MusicAlbum) -> &mut Self {
        self.set_object_type(OpenGraphType::MusicAlbum);
        self.extend(album.properties())
    }

    pub fn music_playlist(&mut self, playlist: MusicPlaylist) -> &mut Self {
        self.set_object_type(OpenGraphType::MusicPlaylist);
        self.extend(playlist.properties())
    }

    pub fn music_radio_station(&mut self, station: MusicRadioStation) -> &mut Self {
        self.set_object_type(OpenGraphType::MusicRadioStation);
        self.extend(station.properties())
    }

    pub fn video_movie(&mut self, video: Video) -> &mut Self {
        self.set_object_type(OpenGraphType::VideoMovie);
        self.extend(video.properties())
    }

    pub fn video_episode(&mut self, video: Video) -> &mut Self {
        self.set_object_type(OpenGraphType::VideoEpisode);
        self.extend(video.properties())
    }

    pub fn video_tv_show(&mut self, video: Video) -> &mut Self {
        self.set_object_type(OpenGraphType::VideoTvShow);
        self.extend(video.properties())
    }

    pub fn video_other(&mut self, video: Video) -> &mut Self {
        self.set_object_type(OpenGraphType::VideoOther);
        self.extend(video.properties())
    }

    /// Drop every property and media record.
    pub fn clear(&mut self) -> &mut Self {
        self.properties.clear();
        self.images.clear();
        self.videos.clear();
        self.audios.clear();
        self
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn to_map(&self) -> OpenGraphMap {
        OpenGraphMap {
            properties: self.properties.clone(),
            images: self.images.clone(),
            videos: self.videos.clone(),
            audios: self.audios.clone(),
        }
    }

    /// Properties first, then images, videos and audio in insertion order.
    pub fn render(&self, minify: bool) -> String {
        let mut lines: Vec<String> = self
            .properties
            .flatten()
            .map(|(property, content)| meta_property_tag(property, content))
            .collect();

        let media = self
            .images
            .iter()
            .flat_map(OgImage::properties)
            .chain(self.videos.iter().flat_map(OgVideo::properties))
            .chain(self.audios.iter().flat_map(OgAudio::properties));
        for (property, content) in media {
            lines.push(meta_property_tag(property, &content));
        }

        join_lines(lines, minify)
    }

    fn extend(&mut self, props: Vec<(&'static str, PropertyValue)>) -> &mut Self {
        for (key, value) in props {
            self.properties.insert(key, value);
        }
        self
    }
}

impl fmt::Display for OpenGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_types_stored_verbatim() {
        let mut og = OpenGraph::empty();
        for t in OpenGraphType::ALL {
            og.set_type(t.as_str());
            assert_eq!(og.get("og:type").unwrap(), &t.as_str());
        }
    }

    #[test]
    fn test_invalid_type_falls_back_to_website() {
        let mut og = OpenGraph::empty();
        for bad in ["", "Website", "blog", "music", "video.series"] {
            og.set_type("article");
            og.set_type(bad);
            assert_eq!(og.get("og:type").unwrap(), &"website");
        }
    }

    #[test]
    fn test_determiner() {
        let mut og = OpenGraph::empty();
        for d in ["a", "an", "the", "", "auto"] {
            og.determiner(d);
            assert_eq!(og.get("og:determiner").unwrap(), &d);
        }

        let mut og = OpenGraph::empty();
        og.determiner("invalid");
        assert!(!og.has("og:determiner"));
    }

    #[test]
    fn test_add_when_and_remove() {
        let mut og = OpenGraph::empty();
        og.add_when(true, "og:custom", "yes")
            .add_when(false, "og:skipped", "no");
        assert!(og.has("og:custom"));
        assert!(!og.has("og:skipped"));

        og.remove("og:custom").remove("og:custom").remove("og:never");
        assert!(og.properties().is_empty());
        assert!(og.get("og:custom").is_none());
    }

    #[test]
    fn test_locale_alternates() {
        let mut og = OpenGraph::empty();
        og.locale_alternates(Vec::<String>::new());
        assert!(!og.has("og:locale:alternate"));

        og.locale_alternates(["es_ES", "fr_FR"]);
        let html = og.render(false);
        assert!(html.contains(r#"<meta property="og:locale:alternate" content="es_ES" />"#));
        assert!(html.contains(r#"<meta property="og:locale:alternate" content="fr_FR" />"#));
    }

    #[test]
    fn test_multiple_images_render_in_order() {
        let mut og = OpenGraph::empty();
        og.title("T")
            .add_audio(OgAudio::new("https://example.com/a.mp3"))
            .add_video(OgVideo::new("https://example.com/v.mp4"))
            .add_image(OgImage::new("https://example.com/1.jpg").size(800, 600))
            .image("https://example.com/2.jpg");

        assert_eq!(
            og.render(false),
            [
                r#"<meta property="og:title" content="T" />"#,
                r#"<meta property="og:image" content="https://example.com/1.jpg" />"#,
                r#"<meta property="og:image:width" content="800" />"#,
                r#"<meta property="og:image:height" content="600" />"#,
                r#"<meta property="og:image" content="https://example.com/2.jpg" />"#,
                r#"<meta property="og:video" content="https://example.com/v.mp4" />"#,
                r#"<meta property="og:audio" content="https://example.com/a.mp3" />"#,
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_primary_image_replaces_first() {
        let mut og = OpenGraph::empty();
        og.primary_image("https://example.com/1.jpg");
        og.image("https://example.com/2.jpg");
        og.primary_image("https://example.com/new.jpg");
        let urls: Vec<&str> = og.images().iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/new.jpg", "https://example.com/2.jpg"]);
    }

    #[test]
    fn test_article_sets_type_and_authors() {
        let mut og = OpenGraph::empty();
        og.article(Article {
            published_time: Some("2023-01-01T00:00:00Z".into()),
            authors: vec!["Author 1".into(), "Author 2".into(), "Author 3".into()],
            section: Some("Technology".into()),
            ..Article::default()
        });

        let html = og.render(false);
        assert!(html.contains(r#"property="og:type" content="article""#));
        assert!(html.contains(r#"property="article:author" content="Author 1""#));
        assert!(html.contains(r#"property="article:author" content="Author 3""#));
        assert!(html.contains(r#"property="article:section" content="Technology""#));
        assert!(!html.contains("article:tag"));
    }

    #[test]
    fn test_video_episode() {
        let mut og = OpenGraph::empty();
        og.video_episode(Video {
            series: Some("https://example.com/series".into()),
            actors: vec!["https://example.com/actor".into()],
            duration: Some(2700),
            ..Video::default()
        });
        let html = og.render(false);
        assert!(html.contains(r#"property="og:type" content="video.episode""#));
        assert!(html.contains(r#"property="video:series" content="https://example.com/series""#));
        assert!(html.contains(r#"property="video:duration" content="2700""#));
    }

    #[test]
    fn test_music_types() {
        let mut og = OpenGraph::empty();
        og.music_song(MusicSong {
            duration: Some(240),
            album_disc: Some(1),
            album_track: Some(3),
            ..MusicSong::default()
        });
        assert_eq!(og.get("og:type").unwrap(), &"music.song");
        assert_eq!(og.get("music:album:track").unwrap(), &"3");

        og.music_radio_station(MusicRadioStation {
            creators: vec!["https://example.com/station".into()],
        });
        assert_eq!(og.get("og:type").unwrap(), &"music.radio_station");
    }

    #[test]
    fn test_clear() {
        let mut og = OpenGraph::empty();
        og.title("T")
            .image("https://example.com/i.jpg")
            .add_video(OgVideo::new("v"))
            .add_audio(OgAudio::new("a"));
        og.clear();
        assert_eq!(og.render(false), "");
        assert!(og.images().is_empty() && og.videos().is_empty() && og.audios().is_empty());
    }

    #[test]
    fn test_utf8_and_escaping() {
        let mut og = OpenGraph::empty();
        og.title("测试标题 Título Заголовок")
            .description(r#"Tom & "Jerry""#);
        let html = og.render(false);
        assert!(html.contains("测试标题 Título Заголовок"));
        assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
    }

    #[test]
    fn test_defaults_from_config() {
        let mut config = SeoConfig::default();
        config.app.name = "Acme".into();
        config.opengraph.defaults.og_type = "nonsense".into();
        config.opengraph.defaults.url = UrlPolicy::Full;
        let req = PageRequest::parse("https://acme.test/page?x=1").unwrap();

        let og = OpenGraph::new(&config, Some(&req));
        assert_eq!(og.get("og:type").unwrap(), &"website");
        assert_eq!(og.get("og:site_name").unwrap(), &"Acme");
        assert_eq!(og.get("og:locale").unwrap(), &"en_US");
        assert_eq!(og.get("og:url").unwrap(), &"https://acme.test/page?x=1");
    }
}
