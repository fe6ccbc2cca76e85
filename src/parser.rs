use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractError;
use crate::model::{Category, DocumentSnapshot, MethodEntry};

// Selectors for the fakerjs.dev API index page (VitePress layout).
const VERSION_SELECTOR: &str = ".VPFlyout:nth-last-child(1) button";
const GROUP_SELECTOR: &str = ".api-group";
const GROUP_LINK_SELECTOR: &str = "h3 a";
const METHOD_LINK_SELECTOR: &str = "ul li a";

/// Project a documentation page into a snapshot in one pass over the DOM.
///
/// Missing elements never abort extraction: an absent version marker yields an
/// empty version, an absent heading anchor yields an empty name and URL, and a
/// group without list items yields an empty method list.
pub fn parse_document(html: &str) -> Result<DocumentSnapshot, ExtractError> {
    let doc = Html::parse_document(html);

    let version_sel = selector(VERSION_SELECTOR)?;
    let group_sel = selector(GROUP_SELECTOR)?;
    let group_link_sel = selector(GROUP_LINK_SELECTOR)?;
    let method_link_sel = selector(METHOD_LINK_SELECTOR)?;

    let version = doc
        .select(&version_sel)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let categories = doc
        .select(&group_sel)
        .map(|group| {
            let link = group.select(&group_link_sel).next();
            Category {
                name: link.map(element_text).unwrap_or_default(),
                api_url: link
                    .and_then(|a| a.value().attr("href"))
                    .unwrap_or_default()
                    .to_string(),
                methods: group.select(&method_link_sel).map(method_entry).collect(),
            }
        })
        .collect();

    Ok(DocumentSnapshot { version, categories })
}

fn method_entry(anchor: ElementRef) -> MethodEntry {
    // Any non-empty class value marks the entry deprecated, whitespace-only
    // and multi-class values included. The source page's markup works this
    // way; the value is kept verbatim.
    let css_class = anchor.value().attr("class").unwrap_or_default().to_string();
    MethodEntry {
        name: element_text(anchor),
        api_url: anchor
            .value()
            .attr("href")
            .unwrap_or_default()
            .to_string(),
        deprecated: !css_class.is_empty(),
        css_class,
    }
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Parse(format!("selector {css:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> DocumentSnapshot {
        parse_document(html).unwrap()
    }

    fn fixture() -> String {
        std::fs::read_to_string("tests/fixtures/api.html").unwrap()
    }

    #[test]
    fn one_category_per_group_element_in_document_order() {
        let snap = parse(&fixture());
        let names: Vec<&str> = snap.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Airline", "Person", "Randomizer", "String"]);
    }

    #[test]
    fn version_from_last_flyout_button() {
        let snap = parse(&fixture());
        assert_eq!(snap.version, "v9.9.9");
    }

    #[test]
    fn missing_version_marker_yields_empty_version() {
        let html = r#"<div class="api-group"><h3><a href="/api/person.html">Person</a></h3>
            <ul><li><a href="/api/person.html#firstname">firstName</a></li></ul></div>"#;
        let snap = parse(html);
        assert_eq!(snap.version, "");
        assert_eq!(snap.categories.len(), 1);
    }

    #[test]
    fn person_example_structure() {
        let html = r#"<div class="api-group">
            <h3><a href="/api/person.html">Person</a></h3>
            <ul>
              <li><a href="/api/person.html#firstname">firstName</a></li>
              <li><a class="deprecated" href="/api/person.html#zip">zip</a></li>
            </ul></div>"#;
        let snap = parse(html);
        assert_eq!(snap.categories.len(), 1);
        let cat = &snap.categories[0];
        assert_eq!(cat.name, "Person");
        assert_eq!(cat.api_url, "/api/person.html");
        assert_eq!(cat.methods.len(), 2);
        assert_eq!(cat.methods[0].name, "firstName");
        assert!(!cat.methods[0].deprecated);
        assert_eq!(cat.methods[1].name, "zip");
        assert!(cat.methods[1].deprecated);
    }

    #[test]
    fn deprecated_iff_class_attribute_non_empty() {
        let html = r#"<div class="api-group"><h3><a href="/x">X</a></h3><ul>
            <li><a href="/a">plain</a></li>
            <li><a href="/b" class="">emptyClass</a></li>
            <li><a href="/c" class="   ">whitespaceClass</a></li>
            <li><a href="/d" class="foo bar">multiClass</a></li>
            </ul></div>"#;
        let snap = parse(html);
        let methods = &snap.categories[0].methods;
        for m in methods {
            assert_eq!(m.deprecated, !m.css_class.is_empty(), "entry {}", m.name);
        }
        assert!(!methods[0].deprecated);
        assert!(!methods[1].deprecated);
        assert!(methods[2].deprecated, "whitespace-only class still counts");
        assert_eq!(methods[2].css_class, "   ");
        assert!(methods[3].deprecated);
        assert_eq!(methods[3].css_class, "foo bar");
    }

    #[test]
    fn missing_heading_and_hrefs_default_to_empty() {
        let html = r#"<div class="api-group"><ul><li><a>orphan</a></li></ul></div>"#;
        let snap = parse(html);
        let cat = &snap.categories[0];
        assert_eq!(cat.name, "");
        assert_eq!(cat.api_url, "");
        assert_eq!(cat.methods.len(), 1);
        assert_eq!(cat.methods[0].name, "orphan");
        assert_eq!(cat.methods[0].api_url, "");
        assert!(!cat.methods[0].deprecated);
    }

    #[test]
    fn empty_document_yields_empty_snapshot() {
        let snap = parse("");
        assert_eq!(snap.version, "");
        assert!(snap.categories.is_empty());
    }

    #[test]
    fn parse_is_idempotent() {
        let html = fixture();
        assert_eq!(parse(&html), parse(&html));
    }

    #[test]
    fn fixture_deprecated_entries() {
        let snap = parse(&fixture());
        let person = snap
            .categories
            .iter()
            .find(|c| c.name == "Person")
            .unwrap();
        let zip = person.methods.iter().find(|m| m.name == "zip").unwrap();
        assert!(zip.deprecated);
        assert_eq!(zip.css_class, "deprecated");
        let first = person
            .methods
            .iter()
            .find(|m| m.name == "firstName")
            .unwrap();
        assert!(!first.deprecated);
        assert_eq!(first.css_class, "");
    }
}
