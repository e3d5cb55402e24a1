//! Card dispatch into container slots.
//!
//! Containers are passed in explicitly. Each item's category is matched
//! exhaustively against the slots of the active page; categories without a
//! slot are skipped, logged, and counted in the returned [`DispatchReport`].

use tracing::debug;

use crate::config::{ContributionSlotIds, PluginSlotIds};
use crate::page::Container;
use crate::plugins::{PluginDescriptor, PluginType};
use crate::render::{contribution_card, plugin_card};

/// Outcome of one dispatch pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Cards appended to a container.
    pub placed: usize,
    /// Items whose category has no container on this page.
    pub dropped: usize,
}

/// Containers of the plugin page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSlots {
    pub processors: Container,
    pub collectors: Container,
    pub publishers: Container,
}

impl PluginSlots {
    pub fn new(ids: &PluginSlotIds) -> Self {
        Self {
            processors: Container::new(&ids.processors),
            collectors: Container::new(&ids.collectors),
            publishers: Container::new(&ids.publishers),
        }
    }

    /// Container receiving cards of `plugin_type`, if the page has one.
    pub fn slot_mut(&mut self, plugin_type: &PluginType) -> Option<&mut Container> {
        match plugin_type {
            PluginType::Processor => Some(&mut self.processors),
            PluginType::Collector => Some(&mut self.collectors),
            PluginType::Publisher => Some(&mut self.publishers),
            PluginType::Subscriber | PluginType::Types | PluginType::Unknown(_) => None,
        }
    }

    pub fn containers(&self) -> Vec<&Container> {
        vec![&self.processors, &self.collectors, &self.publishers]
    }
}

impl Default for PluginSlots {
    fn default() -> Self {
        Self::new(&PluginSlotIds::default())
    }
}

/// Containers of the contribution page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionSlots {
    pub processors: Container,
    pub subscribers: Container,
    pub publishers: Container,
    pub types: Container,
}

impl ContributionSlots {
    pub fn new(ids: &ContributionSlotIds) -> Self {
        Self {
            processors: Container::new(&ids.processors),
            subscribers: Container::new(&ids.subscribers),
            publishers: Container::new(&ids.publishers),
            types: Container::new(&ids.types),
        }
    }

    pub fn slot_mut(&mut self, category: &PluginType) -> Option<&mut Container> {
        match category {
            PluginType::Processor => Some(&mut self.processors),
            PluginType::Subscriber => Some(&mut self.subscribers),
            PluginType::Publisher => Some(&mut self.publishers),
            PluginType::Types => Some(&mut self.types),
            PluginType::Collector | PluginType::Unknown(_) => None,
        }
    }

    pub fn containers(&self) -> Vec<&Container> {
        vec![
            &self.processors,
            &self.subscribers,
            &self.publishers,
            &self.types,
        ]
    }
}

impl Default for ContributionSlots {
    fn default() -> Self {
        Self::new(&ContributionSlotIds::default())
    }
}

/// Render one card per plugin into the slot for its `type`.
pub fn populate_plugins(plugins: &[PluginDescriptor], slots: &mut PluginSlots) -> DispatchReport {
    let mut report = DispatchReport::default();

    for plugin in plugins {
        match slots.slot_mut(&plugin.plugin_type) {
            Some(container) => {
                container.append(plugin_card(plugin));
                report.placed += 1;
            }
            None => {
                debug!(
                    plugin = %plugin.name,
                    plugin_type = %plugin.plugin_type,
                    "No container for plugin type, skipping"
                );
                report.dropped += 1;
            }
        }
    }

    report
}

/// Render one card per contribution into the slot named by its key.
pub fn populate_contributions(
    plugins: &[PluginDescriptor],
    slots: &mut ContributionSlots,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for plugin in plugins {
        for (key, contribution) in plugin.contributions() {
            let category = PluginType::from_contribution_key(key);
            match slots.slot_mut(&category) {
                Some(container) => {
                    container.append(contribution_card(key, contribution, plugin.repo()));
                    report.placed += 1;
                }
                None => {
                    debug!(
                        plugin = %plugin.name,
                        contribution = key,
                        category = %category,
                        "No container for contribution, skipping"
                    );
                    report.dropped += 1;
                }
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{parse_registry, ParseMode};

    fn descriptor(name: &str, plugin_type: &str) -> PluginDescriptor {
        PluginDescriptor::new(name, PluginType::from_type_tag(plugin_type))
    }

    #[test]
    fn test_populate_plugins_by_type() {
        let plugins = vec![
            descriptor("grobid", "processor"),
            descriptor("arxiv", "collector"),
            descriptor("rss", "publisher"),
            descriptor("say", "processor"),
        ];
        let mut slots = PluginSlots::default();
        let report = populate_plugins(&plugins, &mut slots);

        assert_eq!(report, DispatchReport { placed: 4, dropped: 0 });
        assert_eq!(slots.processors.len(), 2);
        assert_eq!(slots.collectors.len(), 1);
        assert_eq!(slots.publishers.len(), 1);
    }

    #[test]
    fn test_populate_plugins_unknown_type_dropped() {
        let plugins = vec![descriptor("mystery", "narrator"), descriptor("zotero", "subscriber")];
        let mut slots = PluginSlots::default();
        let report = populate_plugins(&plugins, &mut slots);

        assert_eq!(report, DispatchReport { placed: 0, dropped: 2 });
        assert!(slots.containers().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_populate_plugins_requires_exact_type_tag() {
        let plugins = parse_registry(
            r#"[
                {"name": "a", "type": "processors"},
                {"name": "b", "type": " collector "},
                {"name": "c", "type": "types"}
            ]"#,
            ParseMode::Strict,
        )
        .unwrap();
        let mut slots = PluginSlots::default();
        let report = populate_plugins(&plugins, &mut slots);

        assert_eq!(report, DispatchReport { placed: 0, dropped: 3 });
        assert!(slots.containers().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_populate_plugins_duplicates_render_twice() {
        let plugins = vec![descriptor("foo", "processor"), descriptor("foo", "processor")];
        let mut slots = PluginSlots::default();
        populate_plugins(&plugins, &mut slots);
        assert_eq!(slots.processors.len(), 2);
    }

    #[test]
    fn test_single_processor_example() {
        let plugins = parse_registry(
            r#"[{"name":"foo","type":"processor","repo":"a/b"}]"#,
            ParseMode::Strict,
        )
        .unwrap();
        let mut slots = PluginSlots::default();
        populate_plugins(&plugins, &mut slots);

        assert_eq!(slots.processors.len(), 1);
        let card = &slots.processors.cards()[0];
        assert_eq!(card.find_by_class("plugin-name").unwrap().text_content(), "foo");
        assert_eq!(
            card.find_by_class("middle-section").unwrap().attribute("href"),
            Some("https://github.com/a/b")
        );
        let output = card.find_by_class("output-section").unwrap();
        assert!(output.children().is_empty());
    }

    #[test]
    fn test_populate_contributions_by_key() {
        let plugins = parse_registry(
            r#"[
                {
                    "name": "papercast-core",
                    "type": "processor",
                    "repo": "papercast-dev/papercast",
                    "contributes": {
                        "papercast.processors.GROBIDProcessor": {},
                        "papercast.subscribers.ZoteroSubscriber": {},
                        "papercast.publishers.GithubPagesPodcastPublisher": {},
                        "papercast.types.PDFFile": {},
                        "papercast.collectors.ArxivCollector": {},
                        "papercast.narrators.SayNarrator": {}
                    }
                }
            ]"#,
            ParseMode::Strict,
        )
        .unwrap();

        let mut slots = ContributionSlots::default();
        let report = populate_contributions(&plugins, &mut slots);

        assert_eq!(report, DispatchReport { placed: 4, dropped: 2 });
        assert_eq!(slots.processors.len(), 1);
        assert_eq!(slots.subscribers.len(), 1);
        assert_eq!(slots.publishers.len(), 1);
        assert_eq!(slots.types.len(), 1);

        let card = &slots.subscribers.cards()[0];
        assert_eq!(
            card.find_by_class("middle-section").unwrap().attribute("href"),
            Some("https://github.com/papercast-dev/papercast")
        );
        assert!(slots.types.cards()[0].find_by_class("io-section").is_none());
    }

    #[test]
    fn test_populate_contributions_without_contributes() {
        let plugins = vec![descriptor("bare", "processor")];
        let mut slots = ContributionSlots::default();
        let report = populate_contributions(&plugins, &mut slots);
        assert_eq!(report, DispatchReport::default());
    }

    #[test]
    fn test_custom_slot_ids() {
        let ids = PluginSlotIds {
            processors: "p".to_string(),
            collectors: "c".to_string(),
            publishers: "u".to_string(),
        };
        let slots = PluginSlots::new(&ids);
        let containers = slots.containers();
        let ids: Vec<&str> = containers.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["p", "c", "u"]);
    }
}
