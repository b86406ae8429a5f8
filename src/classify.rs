//! Comment classification.
//!
//! Decides whether a comment carries meaning for the interpreter (magic
//! directives), for third-party tooling (linter and debugger directives),
//! or for documentation generators. Everything else is a plain comment.

use regex::Regex;
use std::sync::LazyLock;

/// `# frozen_string_literal: true`, `# -*- coding: utf-8 -*-`,
/// `# vim: set fileencoding=utf-8 :` and friends.
static RE_MAGIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#.*\b(?:frozen_string_literal|encoding|coding|warn_indent|fileencoding)\b")
        .unwrap()
});
static RE_TOOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^#\s*(?:rubocop|reek|simplecov|coveralls|pry|byebug|noinspection|sorbet|type)\b",
    )
    .unwrap()
});
/// YARD-style tags: `# @param`, `# @return`, ...
static RE_DOC_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\s*@\w").unwrap());
static RE_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:class|module)\b").unwrap());

const NODOC_MARKER: &str = ":nodoc:";

/// What a comment is, as far as disposition is concerned.
///
/// Variants are listed in precedence order: when several rules match, the
/// earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    MagicDirective,
    ToolDirective,
    DocComment,
    /// Ordinary prose; always stripped.
    Plain,
}

/// Classify a stripped comment.
///
/// `next_line` is the stripped text of the following physical line. It is
/// only consulted for the "comment right above a class or module" rule.
pub fn classify(comment: &str, next_line: Option<&str>) -> Category {
    if is_magic_directive(comment) {
        Category::MagicDirective
    } else if is_tool_directive(comment) {
        Category::ToolDirective
    } else if is_doc_comment(comment, next_line) {
        Category::DocComment
    } else {
        Category::Plain
    }
}

pub fn is_magic_directive(comment: &str) -> bool {
    RE_MAGIC.is_match(comment)
}

pub fn is_tool_directive(comment: &str) -> bool {
    RE_TOOL.is_match(comment)
}

pub fn is_doc_comment(comment: &str, next_line: Option<&str>) -> bool {
    RE_DOC_TAG.is_match(comment)
        || comment.contains(NODOC_MARKER)
        || next_line.is_some_and(|next| RE_DECLARATION.is_match(next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_directives() {
        for c in [
            "# frozen_string_literal: true",
            "# encoding: utf-8",
            "# coding: utf-8",
            "# warn_indent: true",
            "# fileencoding: utf-8",
            "# -*- coding: big5 -*-",
            "# vim: set fileencoding=utf-8 :",
            "# -*- coding: big5; mode: ruby; frozen_string_literal: true -*-",
        ] {
            assert_eq!(classify(c, None), Category::MagicDirective, "{c}");
        }
    }

    #[test]
    fn not_magic() {
        assert!(!is_magic_directive("# This is a comment"));
        assert!(!is_magic_directive("#!/usr/bin/env ruby"));
        assert!(!is_magic_directive("# rubocop:disable Style/MethodLength"));
        assert!(!is_magic_directive("# recoding the parser"));
        assert!(!is_magic_directive("x = 1 # encoding: utf-8"));
    }

    #[test]
    fn tool_directives() {
        for c in [
            "# rubocop:disable Style/MethodLength",
            "# rubocop:enable Style/MethodLength",
            "# reek:TooManyStatements { max_statements: 6 }",
            "# simplecov: start",
            "# coveralls: off",
            "# pry",
            "# byebug",
            "# noinspection RubyResolve",
            "# sorbet: true",
            "# type: strict",
            "#rubocop:todo Metrics/AbcSize",
        ] {
            assert_eq!(classify(c, None), Category::ToolDirective, "{c}");
        }
    }

    #[test]
    fn not_tool() {
        assert!(!is_tool_directive("# This is a comment"));
        assert!(!is_tool_directive("# frozen_string_literal: true"));
        assert!(!is_tool_directive("#!/usr/bin/env ruby"));
        assert!(!is_tool_directive("# pryor art"));
        assert!(!is_tool_directive("# see rubocop docs"));
    }

    #[test]
    fn doc_tags() {
        assert_eq!(classify("# @param name [String]", None), Category::DocComment);
        assert_eq!(classify("# @return [Integer]", None), Category::DocComment);
        assert_eq!(classify("#@api private", None), Category::DocComment);
    }

    #[test]
    fn nodoc_marker() {
        assert_eq!(classify("# :nodoc:", None), Category::DocComment);
    }

    #[test]
    fn comment_above_declaration() {
        assert_eq!(
            classify("# Documentation", Some("class Test")),
            Category::DocComment
        );
        assert_eq!(
            classify("# Helpers", Some("module Helpers")),
            Category::DocComment
        );
        assert_eq!(
            classify("# Documentation", Some("classify(x)")),
            Category::Plain
        );
        assert_eq!(classify("# Documentation", Some("")), Category::Plain);
    }

    #[test]
    fn not_doc() {
        assert_eq!(classify("# Just a comment", None), Category::Plain);
        assert!(!is_doc_comment("# rubocop:disable all", None));
        assert!(!is_doc_comment("# mail me at a@b.c", None));
    }

    #[test]
    fn precedence() {
        // magic beats tool
        assert_eq!(
            classify("# type: encoding", None),
            Category::MagicDirective
        );
        // tool beats doc
        assert_eq!(
            classify("# rubocop:disable all", Some("class Foo")),
            Category::ToolDirective
        );
        // magic beats doc
        assert_eq!(
            classify("# frozen_string_literal: true", Some("module Foo")),
            Category::MagicDirective
        );
    }
}
