//! Structured image, video and audio records.
//!
//! Kept apart from the flat property map so a page can carry several of
//! each without their `og:image:*` keys colliding.

use serde::Serialize;

/// An `og:image` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub secure_url: Option<String>,
    pub mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alt: Option<String>,
}

impl OgImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn secure_url(mut self, url: impl Into<String>) -> Self {
        self.secure_url = Some(url.into());
        self
    }

    pub fn mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub(crate) fn properties(&self) -> Vec<(&'static str, String)> {
        let mut props = Vec::new();
        push_text(&mut props, "og:image", Some(&self.url));
        push_text(&mut props, "og:image:secure_url", self.secure_url.as_ref());
        push_text(&mut props, "og:image:type", self.mime_type.as_ref());
        push_number(&mut props, "og:image:width", self.width);
        push_number(&mut props, "og:image:height", self.height);
        push_text(&mut props, "og:image:alt", self.alt.as_ref());
        props
    }
}

/// An `og:video` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OgVideo {
    pub url: String,
    pub secure_url: Option<String>,
    pub mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl OgVideo {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn secure_url(mut self, url: impl Into<String>) -> Self {
        self.secure_url = Some(url.into());
        self
    }

    pub fn mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub(crate) fn properties(&self) -> Vec<(&'static str, String)> {
        let mut props = Vec::new();
        push_text(&mut props, "og:video", Some(&self.url));
        push_text(&mut props, "og:video:secure_url", self.secure_url.as_ref());
        push_text(&mut props, "og:video:type", self.mime_type.as_ref());
        push_number(&mut props, "og:video:width", self.width);
        push_number(&mut props, "og:video:height", self.height);
        props
    }
}

/// An `og:audio` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OgAudio {
    pub url: String,
    pub secure_url: Option<String>,
    pub mime_type: Option<String>,
}

impl OgAudio {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn secure_url(mut self, url: impl Into<String>) -> Self {
        self.secure_url = Some(url.into());
        self
    }

    pub fn mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub(crate) fn properties(&self) -> Vec<(&'static str, String)> {
        let mut props = Vec::new();
        push_text(&mut props, "og:audio", Some(&self.url));
        push_text(&mut props, "og:audio:secure_url", self.secure_url.as_ref());
        push_text(&mut props, "og:audio:type", self.mime_type.as_ref());
        props
    }
}

fn push_text(props: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&String>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        props.push((key, v.clone()));
    }
}

fn push_number(props: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<u32>) {
    if let Some(v) = value.filter(|v| *v > 0) {
        props.push((key, v.to_string()));
    }
}
