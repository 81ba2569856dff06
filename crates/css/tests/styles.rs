#![cfg(test)]

use anyhow::{Result, bail};
use serde_json::json;
use valor_styles::{
    DeferredQueue, DefinitionArg, Extension, HandlerOutput, Host, MemoryDocument,
    NoPrefixer, SelectorHandler, Sheet, StyleConfig, StyleDefinition, Styles, Subtree, TokioMicrotasks,
};
use std::rc::Rc;
use tokio::task::LocalSet;

fn init_logging() {
    drop(env_logger::builder().is_test(true).try_init());
}

fn attached(config: &StyleConfig) -> (Styles, MemoryDocument, DeferredQueue) {
    init_logging();
    let document = MemoryDocument::new();
    let queue = DeferredQueue::new();
    let styles = Styles::new(config, Some(Host::new(document.clone(), queue.clone())));
    (styles, document, queue)
}

fn entry<'sheet>(sheet: &'sheet Sheet, name: &str) -> Result<&'sheet StyleDefinition> {
    let Some(definition) = sheet.get(name) else {
        bail!("no definition named `{name}`");
    };
    Ok(definition)
}

/// Nests styles under an ancestor class: `">card"` targets `.card <self>`.
struct Descendant;

impl SelectorHandler for Descendant {
    fn handle(
        &self,
        key: &str,
        base_selector: &str,
        generate_subtree: &mut Subtree<'_>,
    ) -> Result<Option<HandlerOutput>> {
        let Some(ancestor) = key.strip_prefix('>') else {
            return Ok(None);
        };
        Ok(Some(generate_subtree(&format!(".{ancestor} {base_selector}"))?.into()))
    }
}

#[test]
fn later_definitions_win_in_one_rule() -> Result<()> {
    let (styles, document, queue) = attached(&StyleConfig::default());
    let sheet = styles.create_from_json(&json!({
        "red": {"color": "red"},
        "blue": {"color": "blue"}
    }))?;
    let class_name = styles.css(&[entry(&sheet, "red")?.into(), entry(&sheet, "blue")?.into()])?;
    queue.run_pending();
    assert_eq!(
        document.rules("data-valor-styles"),
        [format!(".{class_name}{{color:blue !important;}}")]
    );
    Ok(())
}

#[test]
fn same_definitions_reuse_the_class() -> Result<()> {
    let (styles, document, queue) = attached(&StyleConfig::default());
    let sheet = styles.create_from_json(&json!({"red": {"color": "red"}}))?;
    let red = entry(&sheet, "red")?;

    let first = styles.css(&[red.into()])?;
    queue.run_pending();
    let second = styles.css(&[red.into()])?;
    assert_eq!(first, second);
    assert_eq!(first, red.identifier());
    assert_eq!(queue.pending(), 0);
    assert_eq!(document.rules("data-valor-styles").len(), 1);
    Ok(())
}

#[test]
fn falsy_arguments_do_not_change_the_class() -> Result<()> {
    let (styles, _document, _queue) = attached(&StyleConfig::default());
    let sheet = styles.create_from_json(&json!({
        "a": {"color": "red"},
        "b": {"margin": 4}
    }))?;
    let (first, second) = (entry(&sheet, "a")?, entry(&sheet, "b")?);
    let none: Option<&StyleDefinition> = None;
    assert_eq!(
        styles.css(&[first.into(), false.into(), none.into(), second.into()])?,
        styles.css(&[first.into(), second.into()])?
    );
    assert_eq!(
        styles.css(&[vec![first, second].into()])?,
        styles.css(&[first.into(), second.into()])?
    );
    Ok(())
}

#[test]
fn rehydrated_classes_are_not_injected_again() -> Result<()> {
    let (styles, document, queue) = attached(&StyleConfig::default());
    let sheet = styles.create_from_json(&json!({"red": {"color": "red"}}))?;
    let red = entry(&sheet, "red")?;
    styles.rehydrate([red.identifier()])?;
    assert_eq!(styles.css(&[red.into()])?, red.identifier());
    assert_eq!(queue.pending(), 0);
    assert_eq!(document.style_element_count(), 0);
    Ok(())
}

#[test]
fn extensions_add_selector_handlers() -> Result<()> {
    let (styles, document, queue) = attached(&StyleConfig::default());
    let extended = styles.extend(&[Extension::selector_handler(Descendant)]);
    assert_eq!(styles.handlers().len(), 2);
    assert_eq!(extended.handlers().len(), 3);

    let sheet = extended.create_from_json(&json!({
        "title": {"color": "black", ">card": {"color": "white"}}
    }))?;
    let class_name = extended.css(&[entry(&sheet, "title")?.into()])?;
    queue.run_pending();
    assert_eq!(
        document.rules("data-valor-styles"),
        [
            format!(".{class_name}{{color:black !important;}}"),
            format!(".card .{class_name}{{color:white !important;}}"),
        ]
    );

    // Shared cache: the base instance sees the class as injected.
    assert!(styles.injector().borrow().is_injected(&class_name));
    Ok(())
}

#[test]
fn static_render_collects_css_and_identifiers() -> Result<()> {
    init_logging();
    let styles = Styles::detached(&StyleConfig::default());
    let sheet = styles.create_from_json(&json!({
        "link": {"color": "blue", ":hover": {"color": "red"}},
        "print": {"@media print": {"display": "none"}}
    }))?;
    let page = styles.render_static(|| {
        let link = styles.css(&[entry(&sheet, "link")?.into()])?;
        let print = styles.css(&[entry(&sheet, "print")?.into()])?;
        Ok(format!("<a class=\"{link} {print}\"></a>"))
    })?;

    let (link, print) = (entry(&sheet, "link")?, entry(&sheet, "print")?);
    assert_eq!(
        page.markup,
        format!("<a class=\"{} {}\"></a>", link.identifier(), print.identifier())
    );
    assert_eq!(
        page.css.content,
        format!(
            ".{link}{{color:blue !important;}}.{link}:hover{{color:red !important;}}\
             @media print{{.{print}{{display:none !important;}}}}",
            link = link.identifier(),
            print = print.identifier()
        )
    );
    assert_eq!(
        page.css.rendered_identifiers,
        [link.identifier(), print.identifier()]
    );
    Ok(())
}

#[test]
fn static_render_starts_from_an_empty_cache() -> Result<()> {
    init_logging();
    let styles = Styles::detached(&StyleConfig::default());
    let sheet = styles.create_from_json(&json!({"red": {"color": "red"}}))?;
    let red = entry(&sheet, "red")?;
    let first = styles.render_static(|| styles.css(&[red.into()]))?;
    let second = styles.render_static(|| styles.css(&[red.into()]))?;
    assert_eq!(first.css, second.css);
    assert!(!second.css.content.is_empty());
    Ok(())
}

#[test]
fn suppressed_injection_buffers_until_resumed() -> Result<()> {
    let (styles, document, queue) = attached(&StyleConfig::default());
    let sheet = styles.create_from_json(&json!({"red": {"color": "red"}}))?;
    let red = entry(&sheet, "red")?;

    styles.suppress_style_injection()?;
    let class_name = styles.css(&[red.into()])?;
    assert_eq!(
        styles.buffered_styles()?,
        [format!(".{class_name}{{color:red !important;}}")]
    );
    assert_eq!(queue.pending(), 0);

    styles.clear_buffer_and_resume_style_injection()?;
    assert!(styles.buffered_styles()?.is_empty());
    styles.css(&[red.into()])?;
    assert_eq!(queue.run_pending(), 1);
    assert_eq!(document.rules("data-valor-styles").len(), 1);
    Ok(())
}

#[test]
fn suppressing_again_restarts_the_buffer() -> Result<()> {
    let styles = Styles::detached(&StyleConfig::default());
    styles.suppress_style_injection()?;
    styles.suppress_style_injection()?;
    let mut injector = styles.injector().borrow_mut();
    assert!(matches!(injector.start_buffering(), Err(_)));
    Ok(())
}

#[test]
fn without_important_keeps_declarations_plain() -> Result<()> {
    init_logging();
    let styles = Styles::without_important(None);
    let sheet = styles.create_from_json(&json!({"box": {"opacity": 0.5, "width": 10}}))?;
    let page = styles.render_static(|| styles.css(&[entry(&sheet, "box")?.into()]))?;
    assert_eq!(
        page.css.content,
        format!(".{}{{opacity:0.5;width:10px;}}", page.markup)
    );
    Ok(())
}

#[test]
fn custom_prefixer_replaces_vendor_prefixing() -> Result<()> {
    init_logging();
    let body = json!({"box": {"transform": "rotate(1deg)"}});
    let prefixed = Styles::without_important(None);
    let plain = Styles::without_important(None).with_prefixer(NoPrefixer);

    let sheet = prefixed.create_from_json(&body)?;
    let page = prefixed.render_static(|| prefixed.css(&[entry(&sheet, "box")?.into()]))?;
    assert!(page.css.content.contains("-webkit-transform:rotate(1deg);"));

    let sheet = plain.create_from_json(&body)?;
    let page = plain.render_static(|| plain.css(&[entry(&sheet, "box")?.into()]))?;
    assert_eq!(
        page.css.content,
        format!(".{}{{transform:rotate(1deg);}}", page.markup)
    );
    Ok(())
}

#[test]
fn minified_classes_are_short_and_stable() -> Result<()> {
    init_logging();
    let styles = Styles::detached(&StyleConfig::default());
    assert!(!styles.is_minified());
    styles.minify(true);
    assert!(styles.clone().is_minified());
    let sheet = styles.create_from_json(&json!({"red": {"color": "red"}}))?;
    let red = entry(&sheet, "red")?;
    assert!(!red.identifier().contains("red_"));
    let page = styles.render_static(|| styles.css(&[red.into()]))?;
    assert_eq!(page.markup, format!("_{}", red.identifier()));
    Ok(())
}

#[test]
fn suffix_changes_the_target_style_tag() -> Result<()> {
    let (styles, document, queue) = attached(&StyleConfig::default());
    styles.set_style_tag_suffix("widget")?;
    let sheet = styles.create_from_json(&json!({"red": {"color": "red"}}))?;
    styles.css(&[entry(&sheet, "red")?.into()])?;
    queue.run_pending();
    assert_eq!(document.rules("data-valor-styles-widget").len(), 1);
    assert!(document.rules("data-valor-styles").is_empty());
    Ok(())
}

#[test]
fn explicit_flush_empties_the_buffer() -> Result<()> {
    let (styles, document, queue) = attached(&StyleConfig::default());
    let sheet = styles.create_from_json(&json!({"red": {"color": "red"}}))?;
    styles.css(&[entry(&sheet, "red")?.into()])?;
    styles.flush_to_style_tag()?;
    assert_eq!(document.rules("data-valor-styles").len(), 1);

    // The queued task finds nothing left to do.
    queue.run_pending();
    assert_eq!(document.rules("data-valor-styles").len(), 1);
    Ok(())
}

#[test]
fn empty_selection_is_an_empty_class() -> Result<()> {
    let (styles, _document, queue) = attached(&StyleConfig::default());
    assert_eq!(styles.css(&[DefinitionArg::Skip, false.into()])?, "");
    assert_eq!(queue.pending(), 0);
    Ok(())
}

#[tokio::test]
async fn tokio_host_flushes_after_the_task_yields() -> Result<()> {
    init_logging();
    let document = MemoryDocument::new();
    let local = Rc::new(LocalSet::new());
    let queue = TokioMicrotasks::new(Rc::clone(&local));
    let styles = Styles::with_important(Some(Host::new(document.clone(), queue)));
    let sheet = styles.create_from_json(&json!({"red": {"color": "red"}}))?;
    let red = entry(&sheet, "red")?;

    let class_name = local
        .run_until(async {
            let class_name = styles.css(&[red.into()])?;
            assert!(document.rules("data-valor-styles").is_empty());
            tokio::task::yield_now().await;
            anyhow::Ok(class_name)
        })
        .await?;
    assert_eq!(
        document.rules("data-valor-styles"),
        [format!(".{class_name}{{color:red !important;}}")]
    );
    Ok(())
}
