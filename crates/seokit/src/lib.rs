//! SeoKit: SEO metadata assembly for web pages.
//!
//! Collects title, description, canonical and robots directives, Open Graph
//! properties, Twitter Card properties and JSON-LD documents, then renders
//! them as a single HTML fragment for the page `<head>`.
//!
//! A [`SeoKit`] is built per request from a [`SeoConfig`] and the current
//! [`PageRequest`]; per-entity overrides come from [`store::CachedOverrides`].

pub mod concerns;
pub mod config;
pub mod data;
pub mod directive;
pub mod error;
pub mod json_ld;
pub mod manager;
pub mod meta;
pub mod opengraph;
pub mod property_map;
pub mod request;
pub mod store;
pub mod support;
pub mod title;
pub mod twitter;

pub use concerns::{HasComputedSeo, HasStoredOverride};
pub use config::{SeoConfig, StaticAffix, TitleAffix, UrlPolicy};
pub use data::SeoData;
pub use directive::expand_directives;
pub use error::{Result, SeoError};
pub use json_ld::JsonLd;
pub use manager::SeoKit;
pub use meta::{MetaRobots, MetaTags};
pub use opengraph::{OgAudio, OgImage, OgVideo, OpenGraph, OpenGraphType};
pub use property_map::{PropertyMap, PropertyValue};
pub use request::PageRequest;
pub use twitter::{TwitterCardType, TwitterCards};
