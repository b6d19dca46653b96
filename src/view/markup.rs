use std::fmt::Write as _;

use super::{class, CloudLayer, CloudView, KnobFace, ToggleView};
use crate::layout::KNOB_CRATERS;
use crate::style::{drift_declaration, placement_declarations};

/// Serialise the tree as HTML for hosts that render through a DOM.
pub fn render_html(view: &ToggleView) -> String {
    let mut html = String::new();

    let root_classes = view
        .root
        .class_names
        .iter()
        .map(|name| escape_attribute(name))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(
        html,
        r#"<div class="{root_classes}" style="font-size: {}">"#,
        view.root.font_size_css()
    );

    let mut wrapper_classes = vec![class::WRAPPER, view.wrapper.mode.as_str()];
    if view.wrapper.hovered {
        wrapper_classes.push(class::HOVERED);
    }
    if view.wrapper.animating {
        wrapper_classes.push(class::ANIMATING);
    }
    let _ = write!(
        html,
        r#"<div class="{}" role="switch" aria-checked="{}">"#,
        wrapper_classes.join(" "),
        view.wrapper.mode.is_dark()
    );

    let face = match view.knob.face {
        KnobFace::Sun => class::SUN,
        KnobFace::Moon => class::MOON,
    };
    let _ = write!(
        html,
        r#"<div class="{} {face}" style="{}">"#,
        class::KNOB,
        placement_declarations(&view.knob.placement)
    );
    for _ in 0..KNOB_CRATERS {
        let _ = write!(html, r#"<div class="{}"></div>"#, class::CRATER);
    }
    html.push_str("</div>");

    for (index, layer) in view.layers.iter().enumerate() {
        let _ = write!(
            html,
            r#"<div class="{} {}-{}" style="{}"></div>"#,
            class::BG_LAYER,
            class::BG_LAYER,
            index + 1,
            placement_declarations(&layer.placement)
        );
    }

    for (layer, container) in [
        (CloudLayer::Primary, class::CLOUDS),
        (CloudLayer::Secondary, class::CLOUDS_LIGHT),
    ] {
        let _ = write!(html, r#"<div class="{container}">"#);
        for cloud in view.clouds.iter().filter(|cloud| cloud.layer == layer) {
            write_cloud(&mut html, cloud);
        }
        html.push_str("</div>");
    }

    let mut field_classes = vec![class::STAR_FIELD];
    if view.star_field.visible {
        field_classes.push(class::VISIBLE);
    }
    let _ = write!(html, r#"<div class="{}">"#, field_classes.join(" "));
    for star in &view.star_field.stars {
        let _ = write!(
            html,
            r#"<div class="{} {}" style="{}">"#,
            class::STAR,
            star.size.class_name(),
            placement_declarations(&star.placement)
        );
        for _ in 0..star.parts {
            let _ = write!(html, r#"<div class="{}"></div>"#, class::STAR_PART);
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");

    // wrapper, root
    html.push_str("</div></div>");
    html
}

fn write_cloud(html: &mut String, cloud: &CloudView) {
    let mut style = placement_declarations(&cloud.placement);
    if let Some(drift) = drift_declaration(&cloud.drift) {
        style.push_str("; ");
        style.push_str(&drift);
    }
    if !cloud.visible {
        style.push_str("; opacity: 0");
    }
    let _ = write!(
        html,
        r#"<div class="{}" style="{style}"></div>"#,
        class::CLOUD_ITEM
    );
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
