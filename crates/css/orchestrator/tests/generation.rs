#![cfg(test)]

use anyhow::Result;
use css_injection::{Injector, SharedInjector};
use css_orchestrator::{Generator, ValueTransformer};
use css_prefixer::StaticPrefixer;
use css_selectors::HandlerChain;
use css_style_map::{StyleMap, StyleValue};
use serde_json::json;

fn buffering() -> Result<SharedInjector> {
    drop(env_logger::builder().is_test(true).try_init());
    let injector = Injector::shared("valor-styles", None);
    injector.borrow_mut().start_buffering()?;
    Ok(injector)
}

fn style(value: &serde_json::Value) -> Result<StyleMap> {
    Ok(StyleMap::from_json(value)?)
}

#[test]
fn pseudo_selectors_follow_the_base_ruleset() -> Result<()> {
    let handlers = HandlerChain::defaults();
    let generator = Generator::new(&handlers, &StaticPrefixer, true);
    let injector = buffering()?;
    let definition = style(&json!({"color": "red", ":hover": {"color": "blue"}}))?;
    let rules = generator.generate_css(".foo", &[&definition], &mut injector.borrow_mut())?;
    assert_eq!(
        rules,
        [
            ".foo{color:red !important;}",
            ".foo:hover{color:blue !important;}"
        ]
    );
    Ok(())
}

#[test]
fn media_queries_wrap_the_selector() -> Result<()> {
    let handlers = HandlerChain::defaults();
    let generator = Generator::new(&handlers, &StaticPrefixer, true);
    let injector = buffering()?;
    let definition = style(&json!({"@media print": {"color": "black"}}))?;
    let rules = generator.generate_css(".foo", &[&definition], &mut injector.borrow_mut())?;
    assert_eq!(rules, ["@media print{.foo{color:black !important;}}"]);
    Ok(())
}

#[test]
fn pseudo_inside_media_query() -> Result<()> {
    let handlers = HandlerChain::defaults();
    let generator = Generator::new(&handlers, &StaticPrefixer, false);
    let injector = buffering()?;
    let definition = style(&json!({
        "@media (max-width: 600px)": {"width": 100, ":hover": {"width": 200}}
    }))?;
    let rules = generator.generate_css(".foo", &[&definition], &mut injector.borrow_mut())?;
    assert_eq!(
        rules,
        ["@media (max-width: 600px){.foo{width:100px;}.foo:hover{width:200px;}}"]
    );
    Ok(())
}

#[test]
fn merged_nested_blocks_keep_later_values() -> Result<()> {
    let handlers = HandlerChain::defaults();
    let generator = Generator::new(&handlers, &StaticPrefixer, false);
    let injector = buffering()?;
    let first = style(&json!({":hover": {"color": "red", "margin": 1}}))?;
    let second = style(&json!({":hover": {"color": "blue"}}))?;
    let rules =
        generator.generate_css(".x", &[&first, &second], &mut injector.borrow_mut())?;
    assert_eq!(rules, [".x:hover{margin:1px;color:blue;}"]);
    Ok(())
}

#[test]
fn webkit_variant_precedes_standard_property() -> Result<()> {
    let handlers = HandlerChain::defaults();
    let generator = Generator::new(&handlers, &StaticPrefixer, true);
    let injector = buffering()?;
    let definition = style(&json!({"userSelect": "none", "color": "red"}))?;
    let rules = generator.generate_css(".x", &[&definition], &mut injector.borrow_mut())?;
    assert_eq!(
        rules,
        [".x{-webkit-user-select:none !important;-moz-user-select:none !important;\
          -ms-user-select:none !important;user-select:none !important;color:red !important;}"]
    );
    Ok(())
}

#[test]
fn font_faces_are_injected_before_the_rule_using_them() -> Result<()> {
    let handlers = HandlerChain::defaults();
    let generator = Generator::new(&handlers, &StaticPrefixer, true);
    let injector = buffering()?;
    let definition = style(&json!({
        "fontFamily": [{"fontFamily": "Inter", "src": "url(inter.woff2)"}, "sans-serif"]
    }))?;
    generator.inject_style_once("text", ".text", &[&definition], &mut injector.borrow_mut())?;
    assert_eq!(
        injector.borrow_mut().flush_to_vec(),
        [
            "@font-face{font-family:Inter;src:url(inter.woff2);}",
            ".text{font-family:\"Inter\",sans-serif !important;}"
        ]
    );
    Ok(())
}

#[test]
fn inject_style_once_skips_known_keys() -> Result<()> {
    let handlers = HandlerChain::defaults();
    let generator = Generator::new(&handlers, &StaticPrefixer, true);
    let injector = buffering()?;
    let definition = style(&json!({"color": "red"}))?;
    generator.inject_style_once("red", ".red", &[&definition], &mut injector.borrow_mut())?;
    generator.inject_style_once("red", ".other", &[&definition], &mut injector.borrow_mut())?;
    assert_eq!(injector.borrow().buffered_rules(), [".red{color:red !important;}"]);
    Ok(())
}

/// Quotes bare `content` strings.
struct QuotedContent;

impl ValueTransformer for QuotedContent {
    fn property(&self) -> &str {
        "content"
    }

    fn transform(
        &self,
        value: &StyleValue,
        _generator: &Generator<'_>,
        _injector: &mut Injector,
    ) -> Result<StyleValue> {
        Ok(match value.as_str() {
            Some(text) if !text.starts_with('"') => StyleValue::Str(format!("\"{text}\"")),
            _ => value.clone(),
        })
    }
}

#[test]
fn custom_transformers_replace_the_defaults() -> Result<()> {
    let handlers = HandlerChain::defaults();
    let transformers: &[&dyn ValueTransformer] = &[&QuotedContent];
    let generator = Generator::new(&handlers, &StaticPrefixer, false).with_transformers(transformers);
    let injector = buffering()?;
    let definition = style(&json!({
        "content": "hi",
        "fontFamily": {"fontFamily": "Inter", "src": "url(inter.woff)"}
    }))?;
    let rules = generator.generate_css(".foo", &[&definition], &mut injector.borrow_mut())?;
    // Without the font transformer an inline face has no declaration text.
    assert_eq!(rules, [".foo{content:\"hi\";}"]);
    assert!(injector.borrow().buffered_rules().is_empty());
    Ok(())
}
