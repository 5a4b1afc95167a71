use assert_json_diff::assert_json_eq;
use scraper::{Html, Selector};
use seokit::opengraph::Article;
use seokit::{OgImage, PageRequest, SeoConfig, SeoKit};
use serde_json::{json, Value};

fn populated() -> SeoKit {
    let config = SeoConfig::from_json_str(
        r#"{
            "app": {"name": "Acme", "url": "https://acme.test"},
            "twitter": {"defaults": {"site": "@acme"}}
        }"#,
    )
    .unwrap();
    let req = PageRequest::parse("https://acme.test/blog/hello-world?utm=x").unwrap();

    let mut seo = SeoKit::new(&config, Some(&req));
    seo.title("Hello & <b>World</b>")
        .description("Fish & chips")
        .image("https://acme.test/cover.jpg");
    seo.meta_mut()
        .keywords(["rust", "seo"])
        .add_language("de", "https://acme.test/de/blog/hello-world");
    seo.opengraph_mut()
        .article(Article {
            authors: vec!["Ann".into(), "Bob".into()],
            tags: vec!["intro".into()],
            ..Article::default()
        })
        .add_image(OgImage::new("https://acme.test/extra.jpg").size(800, 600));
    seo.json_ld_mut()
        .website(Value::Null)
        .unwrap()
        .breadcrumb_list([("Home", "https://acme.test"), ("Blog", "https://acme.test/blog")]);
    seo
}

fn tag_attrs(html: &str) -> Vec<(String, String, String)> {
    let doc = Html::parse_fragment(html);
    let selector = Selector::parse("meta, link").unwrap();
    doc.select(&selector)
        .map(|el| {
            let v = el.value();
            let key = v
                .attr("name")
                .or_else(|| v.attr("property"))
                .or_else(|| v.attr("hreflang"))
                .or_else(|| v.attr("rel"))
                .unwrap_or_default()
                .to_string();
            let content = v
                .attr("content")
                .or_else(|| v.attr("href"))
                .unwrap_or_default()
                .to_string();
            (v.name().to_string(), key, content)
        })
        .collect()
}

fn contents_for<'a>(tags: &'a [(String, String, String)], key: &str) -> Vec<&'a str> {
    tags.iter()
        .filter(|(_, k, _)| k.as_str() == key)
        .map(|(_, _, c)| c.as_str())
        .collect()
}

fn ld_documents(html: &str) -> Vec<Value> {
    let doc = Html::parse_fragment(html);
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    doc.select(&selector)
        .map(|el| serde_json::from_str(&el.text().collect::<String>()).unwrap())
        .collect()
}

#[test]
fn minified_and_pretty_carry_the_same_tags() {
    let seo = populated();
    let pretty = seo.render(false).unwrap();
    let minified = seo.render(true).unwrap();

    assert!(pretty.contains('\n'));
    assert!(!minified.contains('\n'));
    assert_eq!(pretty.replace('\n', ""), minified);
    assert_eq!(tag_attrs(&pretty), tag_attrs(&minified));
    assert_eq!(ld_documents(&pretty), ld_documents(&minified));
}

#[test]
fn exactly_one_title() {
    let html = populated().render(false).unwrap();
    let doc = Html::parse_fragment(&html);
    let titles: Vec<String> = doc
        .select(&Selector::parse("title").unwrap())
        .map(|t| t.text().collect())
        .collect();
    assert_eq!(titles, vec!["Hello & World".to_string()]);
    assert!(html.contains("<title>Hello &amp; World</title>"));
    assert!(html.contains(r#"<meta property="og:title" content="Hello &amp; &lt;b&gt;World&lt;/b&gt;" />"#));
}

#[test]
fn tags_decode_to_the_values_set() {
    let html = populated().render(false).unwrap();
    let tags = tag_attrs(&html);
    let find = |key: &str| contents_for(&tags, key);

    assert_eq!(find("description"), vec!["Fish & chips"]);
    assert_eq!(find("og:description"), vec!["Fish & chips"]);
    assert_eq!(find("canonical"), vec!["https://acme.test/blog/hello-world"]);
    assert_eq!(find("og:url"), vec!["https://acme.test/blog/hello-world"]);
    assert_eq!(find("og:type"), vec!["article"]);
    assert_eq!(find("article:author"), vec!["Ann", "Bob"]);
    assert_eq!(
        find("og:image"),
        vec!["https://acme.test/cover.jpg", "https://acme.test/extra.jpg"]
    );
    assert_eq!(find("og:image:width"), vec!["800"]);
    assert_eq!(find("twitter:card"), vec!["summary_large_image"]);
    assert_eq!(find("twitter:site"), vec!["@acme"]);
    assert_eq!(find("de"), vec!["https://acme.test/de/blog/hello-world"]);
}

#[test]
fn json_ld_round_trips() {
    let html = populated().render(false).unwrap();
    let docs = ld_documents(&html);
    assert_eq!(docs.len(), 2);

    assert_json_eq!(
        docs[0],
        json!({
            "@context": "https://schema.org",
            "@type": "WebSite",
            "url": "https://acme.test/blog/hello-world",
            "name": "Acme",
        })
    );
    assert_json_eq!(
        docs[1]["itemListElement"][0],
        json!({"@type": "ListItem", "position": 1, "name": "Home", "item": "https://acme.test"})
    );
}

#[test]
fn json_ld_keeps_unicode_and_slashes_literal() {
    let mut seo = SeoKit::new(&SeoConfig::default(), None);
    let schema = json!({
        "@context": "https://schema.org",
        "@type": "Event",
        "name": "Fête de la musique 🎶",
        "location": {"name": "東京", "url": "https://example.jp/a/b"},
    });
    seo.json_ld_mut().add(&schema).unwrap();

    let html = seo.render(false).unwrap();
    assert!(html.contains("Fête de la musique 🎶"));
    assert!(html.contains("東京"));
    assert!(html.contains("https://example.jp/a/b"));
    assert!(!html.contains("\\/"));

    let docs = ld_documents(&html);
    assert_json_eq!(docs[0], schema);
}

#[test]
fn removed_schema_is_not_rendered() {
    let mut seo = populated();
    seo.json_ld_mut().remove(0).remove(0);
    let docs = ld_documents(&seo.render(true).unwrap());
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["@type"], "BreadcrumbList");
}

#[test]
fn json_ld_value_cannot_break_out_of_script() {
    let mut seo = SeoKit::new(&SeoConfig::default(), None);
    let schema = json!({
        "@type": "Thing",
        "name": "x</script><script>alert(1)</script>",
        "alternateName": "R&D <team>",
    });
    seo.json_ld_mut().add(&schema).unwrap();

    let html = seo.render(false).unwrap();
    let fragment = Html::parse_fragment(&html);
    let scripts = Selector::parse("script").unwrap();
    assert_eq!(fragment.select(&scripts).count(), 1);

    let docs = ld_documents(&html);
    assert_json_eq!(docs[0], schema);
}
