//! The sidebar's table of contents: groups of links, one group per document file.
//!
//! Groups can be collapsed, and links can be filtered by a search query. What the sidebar
//! actually shows is the projection [`NavData::rows`], which is also what link positions in
//! the sidebar are measured against.

use crate::section::Section;
use serde::Serialize;
use std::path::Path;

#[derive(Clone, Debug, Serialize)]
/// A link in the sidebar pointing at one section.
pub struct NavItem {
    /// Identifier of the target section.
    pub id: String,
    /// Text shown for the link.
    pub label: String,
    /// Heading depth of the target, used for indentation.
    pub level: usize,
    #[serde(skip)]
    /// Whether the link survives the current search filter.
    pub visible: bool,
    #[serde(skip)]
    /// Whether the link is the highlighted one.
    pub active: bool,
}

#[derive(Clone, Debug, Serialize)]
/// A titled, collapsible run of links.
pub struct NavGroup {
    /// Stable key derived from the source file.
    pub key: String,
    /// Heading shown above the links.
    pub title: String,
    #[serde(skip)]
    /// Whether the links are folded away.
    pub collapsed: bool,
    #[serde(skip)]
    /// Whether any link in the group survives the current search filter.
    pub visible: bool,
    /// Links in document order.
    pub items: Vec<NavItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Position of a link: group index, then item index within the group.
pub struct LinkRef {
    /// Index into [`NavData::groups`].
    pub group: usize,
    /// Index into the group's items.
    pub item: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One visible line of the sidebar.
pub enum NavRow {
    /// A group header, by group index.
    Group(usize),
    /// A link.
    Item(LinkRef),
}

#[derive(Clone, Debug, Default, Serialize)]
/// Every sidebar group.
pub struct NavData {
    /// Groups in document order.
    pub groups: Vec<NavGroup>,
}

impl NavData {
    #[must_use]
    /// Builds one group per source file from sections in document order.
    ///
    /// When a file opens with a level-1 heading, that heading names the group and gets no
    /// link of its own. Otherwise the group is named after the file and every heading is a link.
    pub fn from_sections(sections: &[Section]) -> Self {
        let mut groups: Vec<NavGroup> = Vec::new();

        for section in sections {
            let starts_group = groups
                .last()
                .is_none_or(|group| group.key != section.file_path);
            if starts_group {
                let (title, titled_by_heading) = if section.level == 1 {
                    (section.title.clone(), true)
                } else {
                    (file_title(&section.file_path), false)
                };
                groups.push(NavGroup {
                    key: section.file_path.clone(),
                    title,
                    collapsed: false,
                    visible: true,
                    items: Vec::new(),
                });
                if titled_by_heading {
                    continue;
                }
            }
            if let Some(group) = groups.last_mut() {
                group.items.push(NavItem {
                    id: section.id.clone(),
                    label: section.title.clone(),
                    level: section.level,
                    visible: true,
                    active: false,
                });
            }
        }

        Self { groups }
    }

    /// Folds or unfolds a group's links.
    pub fn toggle_group(&mut self, group: usize) {
        if let Some(group) = self.groups.get_mut(group) {
            group.collapsed = !group.collapsed;
        }
    }

    /// Shows only links whose label contains `query`, ignoring case.
    ///
    /// Groups left without a matching link are hidden. While a query is active, groups with a
    /// match are unfolded so the match can be seen. An empty query shows everything.
    pub fn filter(&mut self, query: &str) {
        let query = query.to_lowercase();
        for group in &mut self.groups {
            let mut any_visible = false;
            for item in &mut group.items {
                item.visible = query.is_empty() || item.label.to_lowercase().contains(&query);
                any_visible |= item.visible;
            }
            group.visible = query.is_empty() || any_visible;
            if !query.is_empty() && any_visible {
                group.collapsed = false;
            }
        }
    }

    #[must_use]
    /// The sidebar lines currently on show, top to bottom.
    pub fn rows(&self) -> Vec<NavRow> {
        let mut rows = Vec::new();
        for (g, group) in self.groups.iter().enumerate() {
            if !group.visible {
                continue;
            }
            rows.push(NavRow::Group(g));
            if group.collapsed {
                continue;
            }
            rows.extend(
                group
                    .items
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| item.visible)
                    .map(|(i, _)| NavRow::Item(LinkRef { group: g, item: i })),
            );
        }
        rows
    }

    #[must_use]
    /// The link targeting section `id`.
    pub fn link(&self, id: &str) -> Option<LinkRef> {
        self.groups.iter().enumerate().find_map(|(g, group)| {
            group
                .items
                .iter()
                .position(|item| item.id == id)
                .map(|i| LinkRef { group: g, item: i })
        })
    }

    #[must_use]
    /// The link at `link`.
    pub fn item(&self, link: LinkRef) -> Option<&NavItem> {
        self.groups.get(link.group)?.items.get(link.item)
    }

    /// Mutable access to the link at `link`.
    pub fn item_mut(&mut self, link: LinkRef) -> Option<&mut NavItem> {
        self.groups.get_mut(link.group)?.items.get_mut(link.item)
    }

    #[must_use]
    /// Row index of `link` within [`Self::rows`], or `None` if it is hidden.
    pub fn row_of(&self, link: LinkRef) -> Option<usize> {
        self.rows().iter().position(|row| *row == NavRow::Item(link))
    }

    #[must_use]
    /// Identifiers of all highlighted links.
    pub fn active_ids(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|group| &group.items)
            .filter(|item| item.active)
            .map(|item| item.id.as_str())
            .collect()
    }
}

fn file_title(file_path: &str) -> String {
    Path::new(file_path)
        .file_stem()
        .map_or_else(|| file_path.to_string(), |s| s.to_string_lossy().to_string())
}

#[cfg(test)]
#[path = "tests/nav.rs"]
mod tests;
