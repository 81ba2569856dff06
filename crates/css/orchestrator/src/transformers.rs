//! Value transformers for properties whose values carry side rules.
//!
//! A `fontFamily` value may describe whole `@font-face` rules and an
//! `animationName` value whole `@keyframes` blocks. Before a ruleset is
//! rendered these are injected on their own and the declaration value is
//! replaced with the name they can be referred to by.

use crate::Generator;
use anyhow::{Result, bail};
use css_injection::Injector;
use css_selectors::HandlerChain;
use css_style_map::{ANIMATION_NAME, FONT_FAMILY, FontFace, StyleMap, StyleValue, hash_object};
use css_values_units::format_number;
use log::warn;

/// Rewrites the value of one property before its ruleset is rendered.
pub trait ValueTransformer {
    /// The camel-cased property this transformer owns.
    fn property(&self) -> &str;

    /// Return the replacement for `value`, injecting any side rules
    /// through `injector`.
    ///
    /// # Errors
    /// Generation and injection failures.
    fn transform(
        &self,
        value: &StyleValue,
        generator: &Generator<'_>,
        injector: &mut Injector,
    ) -> Result<StyleValue>;
}

/// Transformers every generator starts with, in the order they run.
pub const DEFAULT_TRANSFORMERS: &[&dyn ValueTransformer] =
    &[&FontFamilyTransformer, &AnimationNameTransformer];

/// Plain text of a terminal value inside a list.
fn terminal_text(value: &StyleValue) -> Option<String> {
    match value {
        StyleValue::Str(text) => Some(text.clone()),
        StyleValue::Number(number) => Some(format_number(*number)),
        StyleValue::Null
        | StyleValue::List(_)
        | StyleValue::Nested(_)
        | StyleValue::FontFace(_)
        | StyleValue::Keyframes(_) => None,
    }
}

/// Injects inline font faces and joins font stacks.
#[derive(Clone, Copy, Debug, Default)]
pub struct FontFamilyTransformer;

impl FontFamilyTransformer {
    /// Inject `face` once, keyed by its `src`, and return its quoted family.
    fn inject_face(face: &FontFace, generator: &Generator<'_>, injector: &mut Injector) -> Result<String> {
        let Some(family) = face.family() else {
            bail!("@font-face definition without a fontFamily");
        };
        let Some(src) = face.src() else {
            bail!("@font-face definition for `{family}` without a src");
        };
        let no_handlers = HandlerChain::empty();
        generator
            .with_handlers(&no_handlers)
            .with_important(false)
            .inject_style_once(src, "@font-face", &[face.descriptors()], injector)?;
        Ok(format!("\"{family}\""))
    }

    fn stack(
        items: &[StyleValue],
        generator: &Generator<'_>,
        injector: &mut Injector,
    ) -> Result<String> {
        let mut names: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            let name = match item {
                StyleValue::List(nested) => Some(Self::stack(nested, generator, injector)?),
                StyleValue::FontFace(face) => Some(Self::inject_face(face, generator, injector)?),
                StyleValue::Nested(descriptors) => Some(Self::inject_face(
                    &FontFace::from_descriptors(descriptors.clone()),
                    generator,
                    injector,
                )?),
                other => terminal_text(other),
            };
            if let Some(name) = name
                && !names.contains(&name)
            {
                names.push(name);
            }
        }
        Ok(names.join(","))
    }
}

impl ValueTransformer for FontFamilyTransformer {
    #[inline]
    fn property(&self) -> &str {
        FONT_FAMILY
    }

    fn transform(
        &self,
        value: &StyleValue,
        generator: &Generator<'_>,
        injector: &mut Injector,
    ) -> Result<StyleValue> {
        Ok(match value {
            StyleValue::List(items) => Self::stack(items, generator, injector)?.into(),
            StyleValue::FontFace(face) => Self::inject_face(face, generator, injector)?.into(),
            StyleValue::Nested(descriptors) => Self::inject_face(
                &FontFace::from_descriptors(descriptors.clone()),
                generator,
                injector,
            )?
            .into(),
            other => other.clone(),
        })
    }
}

/// Injects inline keyframes under content-derived names.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationNameTransformer;

impl AnimationNameTransformer {
    /// Inject `@keyframes keyframe_<hash>{...}` once and return its name.
    fn inject_keyframes(stops: &StyleMap, generator: &Generator<'_>, injector: &mut Injector) -> Result<String> {
        let name = format!("keyframe_{}", hash_object(stops));
        if injector.is_injected(&name) {
            return Ok(name);
        }

        let stop_generator = generator.with_important(false);
        let mut block = format!("@keyframes {name}{{");
        for (offset, stop) in stops.iter() {
            let StyleValue::Nested(body) = stop else {
                warn!("keyframe stop `{offset}` of {name} is not a style block");
                continue;
            };
            block.push_str(&stop_generator.generate_css(offset, &[body], injector)?.concat());
        }
        block.push('}');

        injector.inject_generated_once(&name, vec![block])?;
        Ok(name)
    }

    fn name_of(value: &StyleValue, generator: &Generator<'_>, injector: &mut Injector) -> Result<Option<String>> {
        Ok(match value {
            StyleValue::List(items) => {
                let mut names = Vec::with_capacity(items.len());
                for item in items {
                    names.extend(Self::name_of(item, generator, injector)?);
                }
                Some(names.join(","))
            }
            StyleValue::Keyframes(keyframes) => {
                Some(Self::inject_keyframes(keyframes.stops(), generator, injector)?)
            }
            StyleValue::Nested(stops) => Some(Self::inject_keyframes(stops, generator, injector)?),
            other => terminal_text(other),
        })
    }
}

impl ValueTransformer for AnimationNameTransformer {
    #[inline]
    fn property(&self) -> &str {
        ANIMATION_NAME
    }

    fn transform(
        &self,
        value: &StyleValue,
        generator: &Generator<'_>,
        injector: &mut Injector,
    ) -> Result<StyleValue> {
        match value {
            StyleValue::List(_) | StyleValue::Keyframes(_) | StyleValue::Nested(_) => {
                Ok(Self::name_of(value, generator, injector)?.into())
            }
            other => Ok(other.clone()),
        }
    }
}
