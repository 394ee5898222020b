use gpui_transformer::{transform, TransformConfig, UnknownTokenPolicy};
use pretty_assertions::assert_eq;

fn transform_default(source: &str) -> String {
    transform(source, &TransformConfig::default()).code
}

#[test]
fn test_component_file() {
    let source = r#"// @ts-nocheck
import React from "react"

const input = () => {
  return (
    <>
      <button className="flex items-center gap-2 px-4 py-2 bg-[#6C63FF] rounded-lg text-white font-semibold">
        Click me
      </button>
      <div className="flex flex-col gap-4 p-4 bg-[#1E1E2E] rounded-lg w-full">
        <span className="text-sm font-semibold text-white">Hello</span>
      </div>
      <div className="size-[500px] bg-[#505050]" />
    </>
  )
}

export default input
"#;

    let expected = r#"// @ts-nocheck
use gpui::{div, rgb, px};
import React from "react"

const input = () => {
  return (
    div()
    .child(div()
        .flex()
        .items_center()
        .gap_2()
        .px_4()
        .py_2()
        .bg(rgb(0x6C63FF))
        .rounded_lg()
        .text_color(white())
        .font_semibold()
        .child("Click me"))
    .child(div()
        .flex()
        .flex_col()
        .gap_4()
        .p_4()
        .bg(rgb(0x1E1E2E))
        .rounded_lg()
        .w_full()
        .child(div()
            .text_sm()
            .font_semibold()
            .text_color(white())
            .child("Hello")))
    .child(div()
        .size(px(500.0))
        .bg(rgb(0x505050)))
  )
}

export default input
"#;

    assert_eq!(transform_default(source), expected);
}

#[test]
fn test_snapshot_stateful_elements() {
    let source = r#"const toolbar = (
  <div className="flex gap-1">
    <button onClick={save} useDefaults>Save</button>
    <button id="cancel" onClick={cancel}>Cancel</button>
    <button onClick={reset}>Reset</button>
  </div>
);"#;

    insta::assert_snapshot!(transform_default(source), @r###"
    use gpui::{div, rgb, px};
    const toolbar = (
      div()
        .flex()
        .gap_1()
        .child(div()
            .id("el_button_0")
            .px_4()
            .py_2()
            .rounded_md()
            .cursor_pointer()
            .on_click(save)
            .child("Save"))
        .child(div()
            .id("cancel")
            .on_click(cancel)
            .child("Cancel"))
        .child(div()
            .id("el_button_1")
            .on_click(reset)
            .child("Reset"))
    );
    "###);
}

#[test]
fn test_snapshot_inline_children_and_templates() {
    let source =
        "const greeting = <p className=\"text-lg\">Hello, {name}! {`You have ${count} new messages`}</p>;";

    insta::assert_snapshot!(transform_default(source), @r###"
    use gpui::{div, rgb, px};
    const greeting = div()
        .text_lg()
        .children(["Hello,", name, "!", format!("You have {} new messages", &count)]);
    "###);
}

#[test]
fn test_snapshot_constructors_in_first_use_order() {
    let source = "const a = <img src={logo} />;
const b = <svg className=\"size-4\"><path d={icon} /></svg>;
const c = <section />;";

    insta::assert_snapshot!(transform_default(source), @r###"
    use gpui::{img, svg, path, div, rgb, px};
    const a = img()
        .src(logo);
    const b = svg()
        .size_4()
        .child(path()
            .d(icon));
    const c = div();
    "###);
}

#[test]
fn test_conditional_attributes() {
    let source = "const panel = <div when={(open, |el| el.flex())} whenSome={(user, |el, u| el.child(u))} hidden>x</div>;";
    assert_eq!(
        transform_default(source),
        "use gpui::{div, rgb, px};
const panel = div()
    .when(open, |el| el.flex())
    .when_some(user, |el, u| el.child(u))
    .visible(false)
    .child(\"x\");"
    );
}

#[test]
fn test_repeated_attribute_keeps_first_position_and_last_value() {
    assert_eq!(
        transform_default("const a = <div title=\"a\" id=\"x\" title=\"b\"/>;"),
        "use gpui::{div, rgb, px};
const a = div()
    .id(\"x\")
    .title(\"b\");"
    );
    assert_eq!(
        transform_default("const a = <div title=\"a\" disabled title=\"b\" />;"),
        "use gpui::{div, rgb, px};
const a = div()
    .title(\"b\")
    .disabled();"
    );
}

#[test]
fn test_template_child_with_braces_in_strings() {
    assert_eq!(
        transform_default("const a = <p>{`a ${f(\"}\")} b`}</p>;"),
        "use gpui::{div, rgb, px};
const a = div()
    .child(format!(\"a {} b\", &f(\"}\")));"
    );
    assert_eq!(
        transform_default("const a = <p>{`a` + `b`}</p>;"),
        "use gpui::{div, rgb, px};
const a = div()
    .child(`a` + `b`);"
    );
}

#[test]
fn test_malformed_tuple_falls_back_to_expression() {
    let source = "const panel = <div when={(a, b, c)}>x</div>;";
    assert_eq!(
        transform_default(source),
        "use gpui::{div, rgb, px};
const panel = div()
    .when((a, b, c))
    .child(\"x\");"
    );
}

#[test]
fn test_markup_inside_expressions_stays_verbatim() {
    let source = "const list = <ul className=\"flex-col\">{items.map(i => <li>{i}</li>)}</ul>;";
    assert_eq!(
        transform_default(source),
        "use gpui::{div, rgb, px};
const list = div()
    .flex_col()
    .child(items.map(i => <li>{i}</li>));"
    );
}

#[test]
fn test_unknown_tokens_marked() {
    let config = TransformConfig {
        unknown_tokens: UnknownTokenPolicy::Mark,
        ..TransformConfig::default()
    };
    let result = transform("const a = <div className=\"flex sparkle\" />;", &config);
    assert_eq!(
        result.code,
        "use gpui::{div, rgb, px};
const a = div()
    .flex()
    /* unknown class: sparkle */;"
    );
}

#[test]
fn test_ids_restart_for_each_file() {
    let source = "const a = <div onClick={go} />;";
    let config = TransformConfig::default();
    let first = transform(source, &config);
    let second = transform(source, &config);
    assert!(first.code.contains(".id(\"el_div_0\")"));
    assert_eq!(first.code, second.code);
}

#[test]
fn test_no_markup_returns_input() {
    let source = "// @ts-nocheck\nexport const n = 1 < 2;\n";
    assert_eq!(transform_default(source), source);
}

#[test]
fn test_output_is_deterministic() {
    let source = r#"const a = <div className="p-2"><img/><svg/></div>; const b = <canvas/>;"#;
    let config = TransformConfig::default();
    let outputs: Vec<String> = (0..5).map(|_| transform(source, &config).code).collect();
    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(outputs[0].starts_with("use gpui::{div, img, svg, canvas, rgb, px};\n"));
}
