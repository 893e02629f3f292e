use std::fmt::Write as _;

use er_core::ItemId;
use er_core::core_api::{
    CompletionStats, CrossReference, DecodeOutcome, EnrichedItem, FilterCriteria, FilteredView,
    RegionStats, SlotSummary, StatsSnapshot, group_by_region,
};
use serde_json::{Map as JsonMap, Value as JsonValue};

const SHEET_WIDTH: usize = 76;
const ITEM_COL_NAME: usize = 44;
const ITEM_COL_TYPE: usize = 10;
const CATEGORY_COL: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    /// Adds hints, reference links and empty category rows.
    pub verbose: bool,
}

pub fn render_slots_json(slots: &[SlotSummary], style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Array(slots.iter().map(slot_to_json).collect()),
    }
}

pub fn render_decode_json(outcome: &DecodeOutcome, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(outcome_json(outcome)),
    }
}

/// Full checklist: the decoded slot, whole-catalog stats, and the filtered
/// items with region stats recomputed over them.
pub fn render_checklist_json(
    outcome: &DecodeOutcome,
    result: &CrossReference,
    criteria: &FilterCriteria,
    view: &FilteredView<'_>,
    style: JsonStyle,
) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => {
            let mut out = outcome_header_json(outcome);
            out.insert("stats".to_string(), stats_snapshot_to_json(&result.stats));
            out.insert("filter".to_string(), criteria_to_json(criteria));
            out.insert(
                "items".to_string(),
                JsonValue::Array(view.items.iter().map(|item| item_to_json(item)).collect()),
            );
            out.insert(
                "filtered_regions".to_string(),
                region_rows_to_json(&view.regions),
            );
            JsonValue::Object(out)
        }
    }
}

pub fn render_stats_json(stats: &StatsSnapshot, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => stats_snapshot_to_json(stats),
    }
}

pub fn render_unmatched_json(ids: &[ItemId], style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => ids_to_json(ids),
    }
}

pub fn item_to_json(item: &EnrichedItem) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("id".to_string(), JsonValue::String(item.id.clone()));
    m.insert("name".to_string(), JsonValue::String(item.name.clone()));
    m.insert(
        "category".to_string(),
        JsonValue::String(item.category().as_str().to_string()),
    );
    m.insert("region".to_string(), JsonValue::String(item.region.clone()));
    m.insert(
        "subregion".to_string(),
        JsonValue::String(item.subregion.clone()),
    );
    m.insert(
        "type".to_string(),
        JsonValue::String(item.acquisition.as_str().to_string()),
    );
    m.insert("hint".to_string(), JsonValue::String(item.hint.clone()));
    m.insert("farmable".to_string(), JsonValue::Bool(item.farmable));
    m.insert("owned".to_string(), JsonValue::Bool(item.owned));
    m.insert("url".to_string(), JsonValue::String(item.url.clone()));
    JsonValue::Object(m)
}

fn slot_to_json(slot: &SlotSummary) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("slot".to_string(), JsonValue::from(slot.index));
    m.insert("name".to_string(), JsonValue::String(slot.name.clone()));
    m.insert("empty".to_string(), JsonValue::Bool(slot.is_empty()));
    JsonValue::Object(m)
}

fn outcome_header_json(outcome: &DecodeOutcome) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();
    out.insert("slot".to_string(), JsonValue::from(outcome.slot()));
    out.insert(
        "character_name".to_string(),
        JsonValue::String(outcome.character_name().to_string()),
    );
    match outcome {
        DecodeOutcome::Decoded(decoded) => {
            out.insert("status".to_string(), JsonValue::from("decoded"));
            out.insert(
                "layout".to_string(),
                JsonValue::String(decoded.layout.as_str().to_string()),
            );
            out.insert(
                "is_expansion".to_string(),
                JsonValue::Bool(decoded.is_expansion()),
            );
        }
        DecodeOutcome::NoInventory { reason, .. } => {
            out.insert("status".to_string(), JsonValue::from("no_inventory"));
            out.insert("reason".to_string(), JsonValue::String(reason.to_string()));
        }
    }
    out
}

fn outcome_json(outcome: &DecodeOutcome) -> JsonMap<String, JsonValue> {
    let mut out = outcome_header_json(outcome);
    out.insert("count".to_string(), JsonValue::from(outcome.ids().len()));
    out.insert("ids".to_string(), ids_to_json(outcome.ids()));
    out
}

fn ids_to_json(ids: &[ItemId]) -> JsonValue {
    JsonValue::Array(
        ids.iter()
            .map(|id| JsonValue::String(id.to_string()))
            .collect(),
    )
}

fn stats_to_json(stats: &CompletionStats) -> JsonMap<String, JsonValue> {
    let mut m = JsonMap::new();
    m.insert("total".to_string(), JsonValue::from(stats.total));
    m.insert("owned".to_string(), JsonValue::from(stats.owned));
    m.insert("missing".to_string(), JsonValue::from(stats.missing));
    m.insert("percentage".to_string(), JsonValue::from(stats.percentage));
    m
}

fn stats_snapshot_to_json(stats: &StatsSnapshot) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "global".to_string(),
        JsonValue::Object(stats_to_json(&stats.global)),
    );
    out.insert(
        "categories".to_string(),
        JsonValue::Array(
            stats
                .categories
                .iter()
                .map(|row| {
                    let mut m = JsonMap::new();
                    m.insert(
                        "category".to_string(),
                        JsonValue::String(row.category.as_str().to_string()),
                    );
                    m.extend(stats_to_json(&row.stats));
                    JsonValue::Object(m)
                })
                .collect(),
        ),
    );
    out.insert("regions".to_string(), region_rows_to_json(&stats.regions));
    JsonValue::Object(out)
}

fn region_rows_to_json(rows: &[RegionStats]) -> JsonValue {
    JsonValue::Array(
        rows.iter()
            .map(|row| {
                let mut m = JsonMap::new();
                m.insert("region".to_string(), JsonValue::String(row.region.clone()));
                m.extend(stats_to_json(&row.stats));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn criteria_to_json(criteria: &FilterCriteria) -> JsonValue {
    let optional = |value: Option<String>| match value {
        Some(v) => JsonValue::String(v),
        None => JsonValue::Null,
    };
    let mut m = JsonMap::new();
    m.insert(
        "status".to_string(),
        JsonValue::String(criteria.status.as_str().to_string()),
    );
    m.insert("region".to_string(), optional(criteria.region.clone()));
    m.insert(
        "category".to_string(),
        optional(criteria.category.map(|c| c.as_str().to_string())),
    );
    m.insert("search".to_string(), optional(criteria.search.clone()));
    JsonValue::Object(m)
}

pub fn render_slot_list(slots: &[SlotSummary]) -> String {
    let mut out = String::new();
    for slot in slots {
        let name = if slot.is_empty() {
            "(empty)"
        } else {
            slot.name.as_str()
        };
        writeln!(out, "{:>3}  {name}", slot.index).expect("writing to String cannot fail");
    }
    out
}

/// One identifier per line, or a single line explaining why there are none.
pub fn render_ids_text(outcome: &DecodeOutcome) -> String {
    let mut out = String::new();
    match outcome {
        DecodeOutcome::Decoded(decoded) => {
            for id in &decoded.ids {
                writeln!(out, "{id}").expect("writing to String cannot fail");
            }
        }
        DecodeOutcome::NoInventory { slot, reason, .. } => {
            writeln!(out, "slot {slot}: {reason}").expect("writing to String cannot fail");
        }
    }
    out
}

pub fn render_unmatched_text(ids: &[ItemId]) -> String {
    let mut out = String::new();
    if ids.is_empty() {
        writeln!(out, "all decoded ids are in the catalog")
            .expect("writing to String cannot fail");
    }
    for id in ids {
        writeln!(out, "{id}").expect("writing to String cannot fail");
    }
    out
}

pub fn render_checklist_text(
    outcome: &DecodeOutcome,
    result: &CrossReference,
    view: &FilteredView<'_>,
    options: TextRenderOptions,
) -> String {
    let mut out = String::new();

    writeln!(out).expect("writing to String cannot fail");
    writeln!(
        out,
        "{}",
        centered_no_trailing("ELDEN RING COLLECTION CHECKLIST", SHEET_WIDTH)
    )
    .expect("writing to String cannot fail");
    let name = if outcome.character_name().is_empty() {
        "(unnamed)"
    } else {
        outcome.character_name()
    };
    let subtitle = match outcome {
        DecodeOutcome::Decoded(decoded) => {
            format!("Slot {}: {name} ({} save)", decoded.slot, decoded.layout)
        }
        DecodeOutcome::NoInventory { slot, reason, .. } => {
            format!("Slot {slot}: {name} ({reason})")
        }
    };
    writeln!(out, "{}", centered_no_trailing(&subtitle, SHEET_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(out).expect("writing to String cannot fail");

    writeln!(
        out,
        "  Completion: {}",
        format_stats(&result.stats.global)
    )
    .expect("writing to String cannot fail");
    writeln!(out).expect("writing to String cannot fail");

    writeln!(out, " ::: Categories :::").expect("writing to String cannot fail");
    for row in &result.stats.categories {
        if row.stats.total == 0 && !options.verbose {
            continue;
        }
        writeln!(
            out,
            "  {:<w$}{}",
            row.category.as_str(),
            format_stats(&row.stats),
            w = CATEGORY_COL
        )
        .expect("writing to String cannot fail");
    }
    writeln!(out).expect("writing to String cannot fail");

    let groups = group_by_region(view.items.iter().copied());
    if groups.is_empty() {
        writeln!(out, "  no items match").expect("writing to String cannot fail");
        return out;
    }

    for region in groups {
        let region_label = match view.regions.iter().find(|row| row.region == region.name) {
            Some(row) => format!(" ::: {} ::: {}", region.name, format_stats(&row.stats)),
            None => format!(" ::: {} :::", region.name),
        };
        writeln!(out, "{region_label}").expect("writing to String cannot fail");
        for subregion in &region.subregions {
            writeln!(out, "   -- {}", subregion.name).expect("writing to String cannot fail");
            for item in &subregion.items {
                write_item_line(&mut out, item, options);
            }
        }
        writeln!(out).expect("writing to String cannot fail");
    }

    out
}

fn write_item_line(out: &mut String, item: &EnrichedItem, options: TextRenderOptions) {
    let mark = if item.owned { "[x]" } else { "[ ]" };
    let farm = if item.farmable { " *" } else { "" };
    let line = format!(
        "     {mark} {:<a$} {:<b$} {}{farm}",
        fit_column(&item.name, ITEM_COL_NAME),
        item.acquisition.as_str(),
        item.category().as_str(),
        a = ITEM_COL_NAME,
        b = ITEM_COL_TYPE,
    );
    writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");

    if options.verbose {
        let hint = strip_markup(&item.hint);
        if !hint.is_empty() {
            writeln!(out, "         {hint}").expect("writing to String cannot fail");
        }
        writeln!(out, "         {}", item.url).expect("writing to String cannot fail");
    }
}

fn format_stats(stats: &CompletionStats) -> String {
    format!("{}/{} ({}%)", stats.owned, stats.total, stats.percentage)
}

/// Hints carry inline HTML for the web front end; text output drops tags.
fn strip_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_tag = false;
    for ch in value.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value.chars().take(width).collect();
    }

    let mut out: String = value.chars().take(width - 3).collect();
    out.push_str("...");
    out
}

fn centered_no_trailing(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }

    let left_padding = (width - len) / 2;
    format!("{}{}", " ".repeat(left_padding), value)
}
