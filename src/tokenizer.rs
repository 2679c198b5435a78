// src/tokenizer.rs
//
// Splits the visible page copy into globally indexed text units. Whitespace
// survives as unindexed gaps so the rendered text reads exactly as authored.

use crate::site_content::{ContentBlock, Inline, InlineKind};

/// One indexed word (or punctuation run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Unit(TextUnit),
    Gap(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenizedInline {
    pub kind: InlineKind,
    pub segments: Vec<Segment>,
}

/// A paragraph or a single list item.
pub type TokenizedElement = Vec<TokenizedInline>;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenizedBlock {
    Paragraph(TokenizedElement),
    List(Vec<TokenizedElement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenizedSection {
    pub block: TokenizedBlock,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenizedContent {
    pub sections: Vec<TokenizedSection>,
    pub total_units: usize,
}

/// Hands out indices across every element it is fed.
#[derive(Debug, Default)]
pub struct Tokenizer {
    next_index: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.next_index
    }

    pub fn tokenize_text(&mut self, text: &str) -> Vec<Segment> {
        split_runs(text)
            .into_iter()
            .map(|(run, is_gap)| {
                if is_gap {
                    Segment::Gap(run.to_string())
                } else {
                    let index = self.next_index;
                    self.next_index += 1;
                    Segment::Unit(TextUnit {
                        index,
                        text: run.to_string(),
                    })
                }
            })
            .collect()
    }

    pub fn tokenize_element(&mut self, inlines: &[Inline]) -> TokenizedElement {
        inlines
            .iter()
            .map(|inline| TokenizedInline {
                kind: inline.kind(),
                segments: self.tokenize_text(inline.content()),
            })
            .collect()
    }

    pub fn tokenize_block(&mut self, block: &ContentBlock) -> TokenizedBlock {
        match block {
            ContentBlock::Paragraph { inlines } => {
                TokenizedBlock::Paragraph(self.tokenize_element(inlines))
            }
            ContentBlock::List { items } => TokenizedBlock::List(
                items
                    .iter()
                    .map(|item| self.tokenize_element(item))
                    .collect(),
            ),
        }
    }
}

/// Tokenize every visible block from scratch, numbering units from 0.
pub fn tokenize_blocks<'a, I>(blocks: I) -> TokenizedContent
where
    I: IntoIterator<Item = (&'a ContentBlock, bool)>,
{
    let mut tokenizer = Tokenizer::new();
    let sections = blocks
        .into_iter()
        .map(|(block, hidden)| TokenizedSection {
            block: tokenizer.tokenize_block(block),
            hidden,
        })
        .collect();

    TokenizedContent {
        sections,
        total_units: tokenizer.total(),
    }
}

/// Split `text` into maximal runs of whitespace and non-whitespace.
/// The flag is true for whitespace runs.
fn split_runs(text: &str) -> Vec<(&str, bool)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_gap = None;

    for (offset, ch) in text.char_indices() {
        let gap = ch.is_whitespace();
        match in_gap {
            Some(previous) if previous != gap => {
                runs.push((&text[start..offset], previous));
                start = offset;
            }
            _ => {}
        }
        in_gap = Some(gap);
    }

    if let Some(gap) = in_gap {
        runs.push((&text[start..], gap));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site_content::SiteContent;

    /// Every unit in index order.
    fn units(content: &TokenizedContent) -> impl Iterator<Item = &TextUnit> {
        content
            .sections
            .iter()
            .flat_map(|section| match &section.block {
                TokenizedBlock::Paragraph(element) => std::slice::from_ref(element),
                TokenizedBlock::List(items) => items.as_slice(),
            })
            .flatten()
            .flat_map(|inline| inline.segments.iter())
            .filter_map(|segment| match segment {
                Segment::Unit(unit) => Some(unit),
                Segment::Gap(_) => None,
            })
    }

    fn text(content: &str) -> Inline {
        Inline::Text {
            content: content.to_string(),
        }
    }

    #[test]
    fn test_split_preserves_whitespace() {
        let runs = split_runs("  hello,\tworld  ");
        assert_eq!(
            runs,
            vec![
                ("  ", true),
                ("hello,", false),
                ("\t", true),
                ("world", false),
                ("  ", true)
            ]
        );
        assert!(split_runs("").is_empty());
    }

    #[test]
    fn test_indices_are_global_across_elements() {
        let blocks = vec![
            ContentBlock::Paragraph {
                inlines: vec![text("one two "), Inline::Strong { content: "three".into() }],
            },
            ContentBlock::List {
                items: vec![vec![text("four")], vec![text("five six")]],
            },
        ];
        let content = tokenize_blocks(blocks.iter().map(|b| (b, false)));

        assert_eq!(content.total_units, 6);
        let words: Vec<_> = units(&content).map(|u| (u.index, u.text.as_str())).collect();
        assert_eq!(
            words,
            vec![(0, "one"), (1, "two"), (2, "three"), (3, "four"), (4, "five"), (5, "six")]
        );
    }

    #[test]
    fn test_gaps_are_not_indexed() {
        let mut tokenizer = Tokenizer::new();
        let segments = tokenizer.tokenize_text("a  b");
        assert_eq!(
            segments,
            vec![
                Segment::Unit(TextUnit { index: 0, text: "a".into() }),
                Segment::Gap("  ".into()),
                Segment::Unit(TextUnit { index: 1, text: "b".into() }),
            ]
        );
        assert_eq!(tokenizer.total(), 2);
    }

    #[test]
    fn test_retokenizing_after_expansion() {
        let site = SiteContent::load().unwrap();
        let collapsed = tokenize_blocks(site.visible_blocks(false));
        let expanded = tokenize_blocks(site.visible_blocks(true));

        assert!(expanded.total_units > collapsed.total_units);
        let indices: Vec<_> = units(&expanded).map(|u| u.index).collect();
        assert_eq!(indices, (0..expanded.total_units).collect::<Vec<_>>());
        assert!(expanded.sections.iter().any(|s| s.hidden));

        // Same visible set, same numbering.
        assert_eq!(tokenize_blocks(site.visible_blocks(false)), collapsed);
    }
}
