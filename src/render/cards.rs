//! Plugin and contribution cards.

use crate::plugins::types::{repo_url, Contribution, PluginDescriptor};

use super::Element;

/// Contribution keys containing this substring get no input/output region.
pub const TYPES_MARKER: &str = "types";

/// Build the card for one plugin descriptor.
///
/// Layout:
///
/// ```text
/// div.container
/// ├── div.section.input-section        (empty placeholder)
/// ├── a.section.middle-section         (href when repo is set)
/// │   ├── img.plugin-icon              (when icon is set)
/// │   └── div.plugin-name
/// └── div.section.output-section       (processor and collector only)
/// ```
pub fn plugin_card(plugin: &PluginDescriptor) -> Element {
    let mut container = Element::new("div").with_class("container");

    container.append(Element::new("div").with_class("section input-section"));

    let mut middle = Element::new("a").with_class("section middle-section");
    if let Some(icon) = plugin.icon() {
        middle.append(icon_element(icon));
    }
    let mut name = Element::new("div").with_class("plugin-name");
    name.append_text(plugin.name.as_str());
    middle.append(name);
    if let Some(href) = plugin.repo_url() {
        middle.set_attribute("href", href);
    }
    container.append(middle);

    if plugin.plugin_type.has_output() {
        container.append(Element::new("div").with_class("section output-section"));
    }

    container
}

/// Build the card for one contribution of a plugin.
///
/// The title is the last dot-separated segment of `key`. Only the names of
/// `input_types` and `output_types` are shown, never the type references.
pub fn contribution_card(key: &str, contribution: &Contribution, repo: Option<&str>) -> Element {
    let mut container = Element::new("div").with_class("container contribution");

    let mut title = Element::new("div").with_class("contribution-title");
    title.append_text(key.rsplit('.').next().unwrap_or(key));
    container.append(title);

    let mut middle = Element::new("a").with_class("section middle-section");
    if let Some(icon) = contribution.icon() {
        middle.append(icon_element(icon));
    }
    if let Some(description) = contribution.short_description() {
        let mut desc = Element::new("div").with_class("short-description");
        desc.append_text(description);
        middle.append(desc);
    }
    if let Some(repo) = repo.filter(|r| !r.is_empty()) {
        middle.set_attribute("href", repo_url(repo));
    }
    container.append(middle);

    if !key.contains(TYPES_MARKER) {
        let mut io = Element::new("div").with_class("section io-section");
        io.append(name_column(
            "io-column input-column",
            contribution.input_names(),
        ));
        io.append(name_column(
            "io-column output-column",
            contribution.output_names(),
        ));
        container.append(io);
    }

    container
}

fn icon_element(src: &str) -> Element {
    let mut icon = Element::new("img").with_class("plugin-icon");
    icon.set_attribute("src", src);
    icon
}

fn name_column<'a>(class: &str, names: impl Iterator<Item = &'a str>) -> Element {
    let mut column = Element::new("div").with_class(class);
    for name in names {
        let mut item = Element::new("div").with_class("subdivision");
        item.append_text(name);
        column.append(item);
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::types::{OrderedMap, PluginType};

    fn processor() -> PluginDescriptor {
        let mut plugin = PluginDescriptor::new("foo", PluginType::Processor);
        plugin.repo = Some("a/b".to_string());
        plugin
    }

    fn contribution() -> Contribution {
        Contribution {
            icon: Some("https://example.com/icon.png".to_string()),
            short_description: Some("Extracts text".to_string()),
            input_types: Some(
                vec![("pdf", "papercast.types.PDFFile".to_string())]
                    .into_iter()
                    .collect::<OrderedMap<_>>(),
            ),
            output_types: Some(
                vec![
                    ("text", "str".to_string()),
                    ("title", "str".to_string()),
                ]
                .into_iter()
                .collect::<OrderedMap<_>>(),
            ),
        }
    }

    #[test]
    fn test_plugin_card_processor_layout() {
        let card = plugin_card(&processor());
        assert!(card.has_class("container"));

        let sections: Vec<&Element> = card.child_elements().collect();
        assert_eq!(sections.len(), 3);
        assert!(sections[0].has_class("input-section"));
        assert!(sections[0].children().is_empty());
        assert!(sections[1].has_class("middle-section"));
        assert!(sections[2].has_class("output-section"));
        assert!(sections[2].children().is_empty());

        let middle = sections[1];
        assert_eq!(middle.tag(), "a");
        assert_eq!(middle.attribute("href"), Some("https://github.com/a/b"));
        assert_eq!(middle.find_by_class("plugin-name").unwrap().text_content(), "foo");
        assert!(middle.find_by_class("plugin-icon").is_none());
    }

    #[test]
    fn test_plugin_card_collector_has_output() {
        let plugin = PluginDescriptor::new("arxiv", PluginType::Collector);
        assert!(plugin_card(&plugin).find_by_class("output-section").is_some());
    }

    #[test]
    fn test_plugin_card_publisher_has_no_output() {
        let plugin = PluginDescriptor::new("rss", PluginType::Publisher);
        let card = plugin_card(&plugin);
        assert!(card.find_by_class("output-section").is_none());
        assert_eq!(card.child_elements().count(), 2);
    }

    #[test]
    fn test_plugin_card_without_repo_has_no_href() {
        let plugin = PluginDescriptor::new("local", PluginType::Processor);
        let card = plugin_card(&plugin);
        let middle = card.find_by_class("middle-section").unwrap();
        assert!(middle.attribute("href").is_none());
    }

    #[test]
    fn test_plugin_card_with_icon() {
        let mut plugin = processor();
        plugin.icon = Some("https://example.com/foo.png".to_string());
        let card = plugin_card(&plugin);
        let icon = card.find_by_class("plugin-icon").unwrap();
        assert_eq!(icon.tag(), "img");
        assert_eq!(icon.attribute("src"), Some("https://example.com/foo.png"));

        // Icon precedes the name inside the middle region.
        let middle = card.find_by_class("middle-section").unwrap();
        let order: Vec<&str> = middle.child_elements().map(|e| e.tag()).collect();
        assert_eq!(order, vec!["img", "div"]);
    }

    #[test]
    fn test_plugin_card_html() {
        let html = plugin_card(&processor()).to_html();
        assert_eq!(
            html,
            concat!(
                r#"<div class="container">"#,
                r#"<div class="section input-section"></div>"#,
                r#"<a class="section middle-section" href="https://github.com/a/b">"#,
                r#"<div class="plugin-name">foo</div></a>"#,
                r#"<div class="section output-section"></div>"#,
                r#"</div>"#
            )
        );
    }

    #[test]
    fn test_contribution_card_full() {
        let card = contribution_card(
            "papercast.processors.GROBIDProcessor",
            &contribution(),
            Some("papercast-dev/papercast-grobid"),
        );

        assert_eq!(
            card.find_by_class("contribution-title").unwrap().text_content(),
            "GROBIDProcessor"
        );

        let middle = card.find_by_class("middle-section").unwrap();
        assert_eq!(
            middle.attribute("href"),
            Some("https://github.com/papercast-dev/papercast-grobid")
        );
        assert!(middle.find_by_class("plugin-icon").is_some());
        assert_eq!(
            middle.find_by_class("short-description").unwrap().text_content(),
            "Extracts text"
        );

        let inputs = card.find_by_class("input-column").unwrap();
        let names: Vec<String> = inputs.child_elements().map(|e| e.text_content()).collect();
        assert_eq!(names, vec!["pdf"]);

        let outputs = card.find_by_class("output-column").unwrap();
        let names: Vec<String> = outputs.child_elements().map(|e| e.text_content()).collect();
        assert_eq!(names, vec!["text", "title"]);
    }

    #[test]
    fn test_contribution_card_never_renders_type_references() {
        let card = contribution_card("x.processor", &contribution(), None);
        assert!(!card.to_html().contains("papercast.types.PDFFile"));
    }

    #[test]
    fn test_contribution_card_types_key_has_no_io_region() {
        let card = contribution_card("papercast.types.PDFFile", &contribution(), None);
        assert!(card.find_by_class("io-section").is_none());
        assert!(card.find_by_class("input-column").is_none());
        assert_eq!(
            card.find_by_class("contribution-title").unwrap().text_content(),
            "PDFFile"
        );
    }

    #[test]
    fn test_contribution_card_minimal() {
        let card = contribution_card("x.processor", &Contribution::default(), None);
        let middle = card.find_by_class("middle-section").unwrap();
        assert!(middle.children().is_empty());
        assert!(middle.attribute("href").is_none());

        let io = card.find_by_class("io-section").unwrap();
        assert_eq!(io.child_elements().count(), 2);
        assert!(card.find_all_by_class("subdivision").is_empty());
        assert_eq!(
            card.find_by_class("contribution-title").unwrap().text_content(),
            "processor"
        );
    }

    #[test]
    fn test_contribution_card_undotted_key() {
        let card = contribution_card("Standalone", &Contribution::default(), None);
        assert_eq!(
            card.find_by_class("contribution-title").unwrap().text_content(),
            "Standalone"
        );
    }
}
