//! Turns a document node tree plus its data context into an [`Element`]
//! tree ready for measuring and rendering.
//!
//! All data binding happens here. Widgets only ever see resolved strings
//! and numbers, so a missing reference simply shows up as empty content.

use serde_json::Value;

use crate::binding::{self, display};
use crate::config;
use crate::model::{Node, NodeKind};
use crate::style::{Background, Direction, Properties, TableFit};
use crate::widgets::{CardWidget, FixedBox, KpiCard, Spacer, TableWidget, TextWidget, TitleWidget};

use super::flex::{self, FlexContainer, FlexItem};
use super::Element;

/// Default number of cells per grid row.
const DEFAULT_GRID_COLUMNS: usize = 2;

/// Build the element for `node`, resolving its references against `data`.
pub fn build(node: &Node, data: &Value) -> Element {
    let props = &node.properties;
    let source = binding::resolve_opt(node.data_ref.as_ref(), data);

    match &node.kind {
        NodeKind::Title { text, date_note } => Element::Title(build_title(
            props,
            field(text.as_ref(), data),
            field(date_note.as_ref(), data),
            &source,
        )),
        NodeKind::Text { text } => {
            let text = match field(text.as_ref(), data) {
                Value::Null => source,
                v => v,
            };
            Element::Text(TextWidget {
                text: display(&text),
                role: props.font.unwrap_or_default(),
                weight: props.weight,
                color: props.color,
                align: props.align.unwrap_or_default(),
                wrap: props.wrap.unwrap_or(false),
            })
        }
        NodeKind::KpiCard {
            label,
            value,
            delta,
            delta_label,
        } => {
            let pick = |own: &Option<Value>, keys: &[&str]| match field(own.as_ref(), data) {
                Value::Null => keys
                    .iter()
                    .map(|k| source.get(*k).cloned().unwrap_or(Value::Null))
                    .find(|v| !v.is_null())
                    .unwrap_or(Value::Null),
                v => v,
            };
            let delta_label = display(&pick(delta_label, &["delta_label"]));
            Element::Kpi(KpiCard {
                label: display(&pick(label, &["label", "title"])),
                value: display(&pick(value, &["value"])),
                delta: parse_number(&pick(delta, &["delta"])),
                delta_label: (!delta_label.is_empty()).then_some(delta_label),
                align: props.align.unwrap_or_default(),
                fill: props.bg_fill,
                outline: props.bg_outline,
            })
        }
        NodeKind::Card { value } => {
            let value = match field(value.as_ref(), data) {
                Value::Null => match &source {
                    Value::Object(map) => map.get("value").cloned().unwrap_or(Value::Null),
                    other => other.clone(),
                },
                v => v,
            };
            Element::Card(CardWidget::new(display(&value)))
        }
        NodeKind::Table { headers, rows } => Element::Table(build_table(
            props,
            field(headers.as_ref(), data),
            field(rows.as_ref(), data),
            source,
        )),
        NodeKind::Spacer => Element::Spacer(Spacer {
            width: props.width,
            height: props.height.unwrap_or(config::GAP_MEDIUM),
        }),
        NodeKind::FixedBox => {
            let mut fixed = FixedBox::new(props.width.unwrap_or(0), props.height.unwrap_or(0));
            if let Some(fill) = props.bg_fill {
                fixed.background.fill = Some(fill);
            }
            if let Some(outline) = props.bg_outline {
                fixed.background.outline = Some(outline);
            }
            if let Some(radius) = props.bg_radius {
                fixed.background.radius = radius;
            }
            Element::FixedBox(fixed)
        }
        NodeKind::Row => Element::Flex(build_flex(node, Direction::Row, data)),
        NodeKind::Column => Element::Flex(build_flex(node, Direction::Column, data)),
        NodeKind::Grid => Element::Flex(build_grid(node, data)),
    }
}

/// Resolve an optional content field.
fn field(value: Option<&Value>, data: &Value) -> Value {
    binding::resolve_opt(value, data)
}

/// A number from a JSON number or a string such as `"+12.5%"`.
fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .trim_end_matches('%')
            .trim_start_matches('+')
            .trim()
            .parse()
            .ok(),
        _ => None,
    }
}

fn build_title(props: &Properties, text: Value, note: Value, source: &Value) -> TitleWidget {
    let (text, note) = match (text, note) {
        (Value::Null, note) => match source {
            Value::Object(map) => {
                let title = map
                    .get("title")
                    .or_else(|| map.get("text"))
                    .cloned()
                    .unwrap_or(Value::Null);
                let note = match note {
                    Value::Null => map.get("date_note").cloned().unwrap_or(Value::Null),
                    n => n,
                };
                (title, note)
            }
            other => (other.clone(), note),
        },
        pair => pair,
    };
    TitleWidget {
        text: display(&text),
        note: display(&note),
        size: props.size.unwrap_or_default(),
        weight: props.weight,
        color: props.color,
        align: props.align.unwrap_or_default(),
    }
}

fn build_table(props: &Properties, headers: Value, rows: Value, source: Value) -> TableWidget {
    let (mut headers, rows) = match (headers, rows) {
        (h, Value::Null) => match source {
            Value::Object(mut map) => {
                let h = match h {
                    Value::Null => map.remove("headers").unwrap_or(Value::Null),
                    h => h,
                };
                (h, map.remove("rows").unwrap_or(Value::Null))
            }
            rows @ Value::Array(_) => (h, rows),
            _ => (h, Value::Null),
        },
        pair => pair,
    };

    let mut rows: Vec<Value> = match rows {
        Value::Array(items) => items,
        _ => vec![],
    };

    // A list of lists whose first row is all strings carries its own header.
    if headers.is_null() {
        let first_is_header = rows
            .first()
            .and_then(Value::as_array)
            .is_some_and(|r| !r.is_empty() && r.iter().all(Value::is_string));
        if first_is_header {
            headers = rows.remove(0);
        } else if let Some(Value::Object(first)) = rows.first() {
            headers = Value::Array(first.keys().cloned().map(Value::String).collect());
        }
    }

    let headers: Vec<String> = match &headers {
        Value::Array(items) => items.iter().map(display).collect(),
        _ => vec![],
    };
    let rows = rows
        .iter()
        .map(|row| match row {
            Value::Array(cells) => cells.iter().map(display).collect(),
            Value::Object(map) if !headers.is_empty() => headers
                .iter()
                .map(|h| map.get(h).map(display).unwrap_or_default())
                .collect(),
            Value::Object(map) => map.values().map(display).collect(),
            scalar => vec![display(scalar)],
        })
        .collect();

    let defaults = TableWidget::default();
    TableWidget {
        headers,
        rows,
        fit: props.fit.unwrap_or(TableFit::Truncate),
        header_height: props.header_height.unwrap_or(defaults.header_height),
        row_height: props.row_height.unwrap_or(defaults.row_height),
        min_row_height: props.min_row_height.unwrap_or(defaults.min_row_height),
        max_row_height: props.max_row_height.unwrap_or(defaults.max_row_height),
    }
}

/// A container with the node's own properties applied.
fn container(props: &Properties, direction: Direction) -> FlexContainer {
    let mut c = FlexContainer::new(direction)
        .gap(props.gap.unwrap_or(flex::DEFAULT_GAP))
        .padding(props.padding.unwrap_or(0))
        .align_items(props.align_items.unwrap_or_default())
        .justify_content(props.justify_content.unwrap_or_default());
    c.background = Background::from_properties(props, flex::DEFAULT_RADIUS);
    c.clip_children = props.clip_children.unwrap_or(true);
    c
}

/// Wrap a built child in its flex parameters.
///
/// In rows, children grow by `width_ratio` (default 1) so they share the
/// width. In columns, children keep their measured height unless marked
/// `fill_remaining`, and a `height` property becomes their basis.
fn flex_item(child: &Node, direction: Direction, data: &Value) -> FlexItem {
    let p = &child.properties;
    let mut item = FlexItem::new(build(child, data));
    match direction {
        Direction::Row => {
            item.grow = p.width_ratio.or(p.grow).unwrap_or(1.0);
            item.basis = p.basis;
        }
        Direction::Column => {
            item.grow = if p.fill_remaining.unwrap_or(false) {
                1.0
            } else {
                p.grow.unwrap_or(0.0)
            };
            item.basis = p.basis.or(p.height);
        }
    }
    if let Some(shrink) = p.shrink {
        item.shrink = shrink;
    }
    item.align_self = p.align_self;
    item
}

fn build_flex(node: &Node, direction: Direction, data: &Value) -> FlexContainer {
    let mut c = container(&node.properties, direction);
    for child in &node.children {
        c.push(flex_item(child, direction, data));
    }
    c
}

/// A column of rows, `columns` equally growing cells per row.
fn build_grid(node: &Node, data: &Value) -> FlexContainer {
    let props = &node.properties;
    let columns = props.columns.unwrap_or(DEFAULT_GRID_COLUMNS).max(1);
    let gap = props.gap.unwrap_or(config::GAP_MEDIUM);

    let mut grid = container(props, Direction::Column).gap(gap);
    for chunk in node.children.chunks(columns) {
        let mut row = FlexContainer::row().gap(gap);
        row.clip_children = grid.clip_children;
        for child in chunk {
            let mut item = FlexItem::new(build(child, data)).grow(1.0).basis(0);
            item.align_self = child.properties.align_self;
            row.push(item);
        }
        grid.push(FlexItem::new(Element::Flex(row)));
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;
    use crate::layout::{Rect, RenderContext};
    use crate::style::FontRole;
    use serde_json::json;

    fn node(v: Value) -> Node {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn title_from_data_object() {
        let data = json!({"header": {"title": "Weekly sales", "date_note": "W42"}});
        let n = node(json!({"type": "title", "data_ref": "$.header"}));
        match build(&n, &data) {
            Element::Title(t) => {
                assert_eq!(t.text, "Weekly sales");
                assert_eq!(t.note, "W42");
            }
            _ => panic!("expected a title"),
        }
    }

    #[test]
    fn title_literal_wins_over_data() {
        let n = node(json!({"type": "title", "text": "Fixed", "data_ref": "$.x"}));
        match build(&n, &json!({"x": "Other"})) {
            Element::Title(t) => assert_eq!(t.text, "Fixed"),
            _ => panic!("expected a title"),
        }
    }

    #[test]
    fn kpi_reads_fields_and_data() {
        let data = json!({"kpis": [{"title": "Revenue", "value": 1200, "delta": "+4.5%"}]});
        let n = node(json!({"type": "kpi_card", "data_ref": "$.kpis[0]"}));
        match build(&n, &data) {
            Element::Kpi(k) => {
                assert_eq!(k.label, "Revenue");
                assert_eq!(k.value, "1200");
                assert_eq!(k.delta, Some(4.5));
            }
            _ => panic!("expected a kpi card"),
        }

        let n = node(json!({"type": "kpi", "label": "Orders", "value": "$.orders", "delta": -2}));
        match build(&n, &json!({"orders": 17})) {
            Element::Kpi(k) => {
                assert_eq!(k.label, "Orders");
                assert_eq!(k.value, "17");
                assert_eq!(k.delta, Some(-2.0));
            }
            _ => panic!("expected a kpi card"),
        }
    }

    #[test]
    fn card_value_from_field_or_data() {
        let data = json!({"uptime": "99.9%", "status": {"value": "healthy"}});
        let cases = [
            (json!({"type": "card", "value": "$.uptime"}), "99.9%"),
            (json!({"type": "card", "data_ref": "$.uptime"}), "99.9%"),
            (json!({"type": "card", "data_ref": "$.status"}), "healthy"),
            (json!({"type": "card", "data_ref": "$.missing"}), ""),
        ];
        for (json, expected) in cases {
            match build(&node(json), &data) {
                Element::Card(c) => assert_eq!(c.value, expected),
                _ => panic!("expected a card"),
            }
        }
    }

    #[test]
    fn missing_data_builds_empty_widgets() {
        let n = node(json!({"type": "kpi_card", "data_ref": "$.nope"}));
        match build(&n, &json!({})) {
            Element::Kpi(k) => {
                assert!(k.label.is_empty() && k.value.is_empty());
                assert_eq!(k.delta, None);
            }
            _ => panic!("expected a kpi card"),
        }
        let n = node(json!({"type": "text", "data_ref": "$.nope"}));
        match build(&n, &json!({})) {
            Element::Text(t) => assert_eq!(t.text, ""),
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn table_from_list_of_lists() {
        let data = json!({"t": [["Region", "Sales"], ["North", 10], ["South", 12.0]]});
        let n = node(json!({"type": "table", "data_ref": "$.t", "properties": {"fit": "shrink"}}));
        match build(&n, &data) {
            Element::Table(t) => {
                assert_eq!(t.headers, vec!["Region", "Sales"]);
                assert_eq!(t.rows, vec![vec!["North", "10"], vec!["South", "12"]]);
                assert_eq!(t.fit, TableFit::Shrink);
            }
            _ => panic!("expected a table"),
        }
    }

    #[test]
    fn table_from_headers_and_object_rows() {
        let data = json!({"t": {"headers": ["name", "qty"], "rows": [{"qty": 3, "name": "bolts"}]}});
        let n = node(json!({"type": "table", "data_ref": "$.t"}));
        match build(&n, &data) {
            Element::Table(t) => {
                assert_eq!(t.headers, vec!["name", "qty"]);
                assert_eq!(t.rows, vec![vec!["bolts", "3"]]);
            }
            _ => panic!("expected a table"),
        }
    }

    #[test]
    fn row_children_share_width_by_ratio() {
        let n = node(json!({
            "type": "row",
            "properties": {"gap": 0},
            "children": [
                {"type": "spacer", "properties": {"width": 0, "width_ratio": 1}},
                {"type": "spacer", "properties": {"width": 0, "width_ratio": 2}}
            ]
        }));
        let Element::Flex(row) = build(&n, &json!({})) else {
            panic!("expected a container");
        };
        let fonts = FontContext::new();
        let rects = row.layout(&fonts, &RenderContext::default(), Rect::sized(300, 50));
        assert_eq!(rects[0].w, 100);
        assert_eq!(rects[1].w, 200);
    }

    #[test]
    fn column_height_becomes_basis() {
        let n = node(json!({
            "type": "column",
            "children": [
                {"type": "text", "text": "a", "properties": {"height": 120}},
                {"type": "text", "text": "b", "properties": {"fill_remaining": true}}
            ]
        }));
        let Element::Flex(col) = build(&n, &json!({})) else {
            panic!("expected a container");
        };
        assert_eq!(col.gap, flex::DEFAULT_GAP);
        assert_eq!(col.children[0].basis, Some(120));
        assert_eq!(col.children[0].grow, 0.0);
        assert_eq!(col.children[1].grow, 1.0);
    }

    #[test]
    fn grid_chunks_children_into_rows() {
        let n = node(json!({
            "type": "grid",
            "properties": {"columns": 3},
            "children": [
                {"type": "spacer"}, {"type": "spacer"}, {"type": "spacer"},
                {"type": "spacer"}, {"type": "spacer"}
            ]
        }));
        let Element::Flex(grid) = build(&n, &json!({})) else {
            panic!("expected a container");
        };
        assert_eq!(grid.direction, Direction::Column);
        let counts: Vec<usize> = grid
            .children
            .iter()
            .map(|item| match &item.widget {
                Element::Flex(row) => row.children.len(),
                _ => 0,
            })
            .collect();
        assert_eq!(counts, vec![3, 2]);
    }

    #[test]
    fn container_background_uses_default_radius() {
        let n = node(json!({"type": "column", "properties": {"bg_fill": "#eeeeee"}}));
        let Element::Flex(col) = build(&n, &json!({})) else {
            panic!("expected a container");
        };
        let bg = col.background.expect("background");
        assert_eq!(bg.radius, flex::DEFAULT_RADIUS);
        assert!(col.clip_children);
    }

    #[test]
    fn text_properties_flow_through() {
        let n = node(json!({
            "type": "text",
            "text": "hello",
            "properties": {"font": "caption", "align": "right", "wrap": true}
        }));
        match build(&n, &json!({})) {
            Element::Text(t) => {
                assert_eq!(t.role, FontRole::Caption);
                assert!(t.wrap);
            }
            _ => panic!("expected text"),
        }
    }
}
