//! Turns command results into terminal lines.
//!
//! Rendering is kept apart from printing so the exact text can be tested.
//! Every function returns one `String` per output line, colors included.

use super::styles::{Styles, ARROW_LEFT, ARROW_RIGHT};
use jt::api::{Change, Listing};
use jt::config::{JtConfig, KEYS};
use jt::tag::TagKind;
use jt::views::{CategoryGroup, DirectoryView, Entry, ExtEntry, IdPreview, LinkedExt};

fn indent(depth: usize) -> String {
    " ".repeat(depth * 2)
}

pub fn render_change(styles: &Styles, change: &Change) -> String {
    match change {
        Change::Tagged { kind, key, name } => styles.tag_line(*kind, key, name).to_string(),
        Change::Removed { kind, key } => styles
            .paint(*kind, &format!("{} [{}] removed", styles.icon_tag(), key))
            .to_string(),
        Change::Attached { dir, ext } => format!(
            "{} {} {}",
            styles.dir_ref(dir, ""),
            styles.paint(TagKind::Extension, ARROW_LEFT),
            styles.tag_line(TagKind::Extension, &ext.key, &ext.name)
        ),
        Change::Linked { ext, dir } => {
            let name = if ext.name.is_empty() {
                "(no name)"
            } else {
                ext.name.as_str()
            };
            format!(
                "{} {} {}",
                styles.tag_line(TagKind::Extension, &ext.key, name),
                styles.paint(TagKind::Extension, ARROW_RIGHT),
                styles.dir_ref(&dir.key, &dir.name)
            )
        }
        Change::Unlinked { ext, dir } => format!(
            "{} {} {}",
            styles.tag_line(TagKind::Extension, &ext.key, &ext.name),
            styles.paint(TagKind::Extension, "removed from"),
            styles.dir_ref(&dir.key, &dir.name)
        ),
        Change::DirNamed { key, old, new } => {
            let shown = |name: &str| -> String {
                if name.is_empty() {
                    key.clone()
                } else {
                    name.to_string()
                }
            };
            let text = format!(
                "{} Renamed dir '{}' {} '{}'",
                styles.icon_dir(),
                shown(old),
                ARROW_RIGHT,
                shown(new)
            );
            styles.ok(&text).to_string()
        }
        Change::DirCreated { key, name, .. } => {
            format!("Created directory {} with name '{}'", key, name)
        }
    }
}

pub fn render_changes(styles: &Styles, changes: &[Change]) -> Vec<String> {
    changes.iter().map(|c| render_change(styles, c)).collect()
}

pub fn render_listing(styles: &Styles, listing: &Listing) -> Vec<String> {
    let mut lines = Vec::new();
    match listing {
        Listing::Categories(categories) => {
            for ac in categories {
                push_tag(styles, &mut lines, 0, TagKind::Category, ac);
            }
        }
        Listing::Category(view) => {
            push_tag(styles, &mut lines, 0, TagKind::Category, &view.category);
            for id in &view.ids {
                push_tag(styles, &mut lines, 1, TagKind::Id, id);
            }
        }
        Listing::Id(view) => {
            push_tag(styles, &mut lines, 0, TagKind::Category, &view.category);
            push_tag(styles, &mut lines, 1, TagKind::Id, &view.id);
            for ext in &view.extensions {
                push_extension(styles, &mut lines, ext);
            }
        }
        Listing::Extension(view) => {
            push_tag(styles, &mut lines, 0, TagKind::Category, &view.category);
            push_tag(styles, &mut lines, 1, TagKind::Id, &view.id);
            push_extension(styles, &mut lines, &view.extension);
        }
        Listing::Directory(view) => render_directory(styles, &mut lines, view),
        Listing::Preview(preview) => render_preview(styles, &mut lines, preview),
    }
    lines
}

fn push_tag(
    styles: &Styles,
    lines: &mut Vec<String>,
    depth: usize,
    kind: TagKind,
    entry: &Entry,
) {
    lines.push(format!(
        "{}{}",
        indent(depth),
        styles.tag_line(kind, &entry.key, &entry.name)
    ));
}

fn push_extension(styles: &Styles, lines: &mut Vec<String>, ext: &ExtEntry) {
    lines.push(format!(
        "{}{}",
        indent(2),
        styles.tag_line(TagKind::Extension, &ext.key, &ext.name)
    ));
    for dir in &ext.dirs {
        push_tag(styles, lines, 3, TagKind::Directory, dir);
    }
}

fn render_directory(styles: &Styles, lines: &mut Vec<String>, view: &DirectoryView) {
    let header = format!("{} {}", styles.icon_dir(), view.title());
    lines.push(styles.paint(TagKind::Directory, &header).to_string());
    for group in &view.groups {
        lines.push(render_group(styles, group, view.show_all));
    }
}

fn render_group(styles: &Styles, group: &CategoryGroup, show_all: bool) -> String {
    let label = styles.paint(
        TagKind::Category,
        &format!("{}:", group.name.as_deref().unwrap_or("(unknown)")),
    );
    let body = if group.extensions.is_empty() {
        "-".to_string()
    } else {
        group
            .extensions
            .iter()
            .map(|ext| linked_entry(styles, ext, show_all))
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!("{}{} {}", indent(1), label, body)
}

/// Full `[key] name` form with `-a`; otherwise the extension name and its
/// id's name, falling back to keys where names are missing.
fn linked_entry(styles: &Styles, ext: &LinkedExt, show_all: bool) -> String {
    if show_all {
        return styles
            .tag_line(TagKind::Extension, &ext.key, &ext.name)
            .to_string();
    }
    let (head, tail) = match (ext.name.is_empty(), ext.id_name.is_empty()) {
        (false, false) => (
            format!("{} {}", styles.icon_tag(), ext.name),
            ext.id_name.as_str(),
        ),
        (true, false) => (styles.icon_tag().to_string(), ext.id_name.as_str()),
        _ => (format!("{} {}", styles.icon_tag(), ext.key), ext.id.as_str()),
    };
    format!(
        "{} {}",
        styles.paint(TagKind::Extension, &head),
        styles.paint(TagKind::Id, &format!("({})", tail))
    )
}

fn render_preview(styles: &Styles, lines: &mut Vec<String>, preview: &IdPreview) {
    for ext in &preview.extensions {
        let header = styles.tag_line(TagKind::Extension, &ext.key, &ext.name);
        lines.push(header.to_string());
        for dir in &ext.dirs {
            push_tag(styles, lines, 1, TagKind::Directory, dir);
        }
        if ext.truncated() {
            lines.push(format!("{}+more", indent(1)));
        } else {
            for _ in 0..=ext.filler_rows() {
                lines.push(format!("{}-", indent(1)));
            }
        }
    }
}

pub fn render_config(config: &JtConfig) -> Vec<String> {
    KEYS.iter()
        .filter_map(|key| config.get(key).map(|value| format!("{} = {}", key, value)))
        .collect()
}
