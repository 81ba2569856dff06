//! Rule-shape checking for generated CSS.
//!
//! A document accepts rules one at a time. [`check_rule`] tokenizes a
//! candidate with `cssparser` and accepts it only when it is exactly one
//! style rule or one block at-rule, which is what a browser's `insertRule`
//! requires. Values are not validated beyond tokenization.
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::StyleSheetParser;

/// Why a rule was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("rule text is empty")]
    Empty,
    #[error("malformed rule near `{0}`")]
    Malformed(String),
    #[error("expected exactly one rule, found {0}")]
    MultipleRules(usize),
}

/// Walks the declarations inside a style rule block.
struct DeclarationWalker;

impl CssDeclarationParser<'_> for DeclarationWalker {
    type Declaration = ();
    type Error = ();

    fn parse_value<'input>(
        &mut self,
        _name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
        _decl_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        if input.slice_from(start).trim().is_empty() {
            return Err(input.new_error(BasicParseErrorKind::EndOfInput));
        }
        Ok(())
    }
}

impl CssAtRuleParser<'_> for DeclarationWalker {
    type Prelude = ();
    type AtRule = ();
    type Error = ();
}

impl CssQualifiedRuleParser<'_> for DeclarationWalker {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();
}

impl CssRuleBodyItemParser<'_, (), ()> for DeclarationWalker {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Top-level parser accepting style rules and block at-rules.
struct RuleParser;

impl<'input> CssAtRuleParser<'input> for RuleParser {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'token>(
        &mut self,
        _name: CowRcStr<'input>,
        input: &mut Parser<'input, 'token>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        while input.next_including_whitespace_and_comments().is_ok() {}
        Ok(())
    }

    fn parse_block<'token>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, 'token>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        while input.next_including_whitespace_and_comments().is_ok() {}
        Ok(())
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        // Statement at-rules (`@import`) cannot be inserted one by one here.
        Err(())
    }
}

impl<'input> CssQualifiedRuleParser<'input> for RuleParser {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'token>(
        &mut self,
        input: &mut Parser<'input, 'token>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        if input.slice_from(start).trim().is_empty() {
            return Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid));
        }
        Ok(())
    }

    fn parse_block<'token>(
        &mut self,
        _selector: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, 'token>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        let mut collector = DeclarationWalker;
        // Browsers drop a declaration they cannot parse and keep the rule.
        CssRuleBodyParser::new(input, &mut collector).for_each(drop);
        Ok(())
    }
}

/// Check that `rule` is exactly one insertable rule.
///
/// # Errors
/// [`SyntaxError::Empty`] for blank text, [`SyntaxError::Malformed`] when
/// any part fails to parse and [`SyntaxError::MultipleRules`] when more than
/// one rule is present.
pub fn check_rule(rule: &str) -> Result<(), SyntaxError> {
    let mut input = ParserInput::new(rule);
    let mut parser = Parser::new(&mut input);
    let mut rules = RuleParser;
    let mut accepted = 0_usize;
    for item in StyleSheetParser::new(&mut parser, &mut rules) {
        if let Err((_, slice)) = item {
            return Err(SyntaxError::Malformed(slice.trim().to_owned()));
        }
        accepted += 1;
    }
    match accepted {
        0 => Err(SyntaxError::Empty),
        1 => Ok(()),
        count => Err(SyntaxError::MultipleRules(count)),
    }
}
