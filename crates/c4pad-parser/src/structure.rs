//! Reconstruction of the element tree from classified lines.
//!
//! This is the second parsing pass. It walks the [`Line`]s produced by
//! [`line::classify`] with a stack of open boundaries and records every
//! declared element, its parent, and for boundaries the line that closes
//! their block.
//!
//! The resulting [`SourceStructure`] is a disposable view of one text: line
//! indices are positions in that text only, and the structure must be rebuilt
//! after every edit.

use indexmap::IndexSet;
use log::{debug, trace};

use c4pad_core::ElementKind;

use crate::{
    line::{self, Line},
    span::Span,
};

/// One declared element or boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNode<'src> {
    alias: &'src str,
    label: &'src str,
    macro_name: &'src str,
    parent: Option<&'src str>,
    parent_index: Option<usize>,
    line: usize,
    closing_line: Option<usize>,
    opens_block: bool,
}

impl<'src> EntityNode<'src> {
    /// The alias by which this element is referenced.
    pub fn alias(&self) -> &'src str {
        self.alias
    }

    /// The display label.
    pub fn label(&self) -> &'src str {
        self.label
    }

    /// The macro name used to declare this element, as written.
    pub fn macro_name(&self) -> &'src str {
        self.macro_name
    }

    /// The declaring macro as a known [`ElementKind`], if it is one.
    pub fn kind(&self) -> Option<ElementKind> {
        self.macro_name.parse().ok()
    }

    /// Alias of the enclosing boundary, or `None` at the top level.
    pub fn parent(&self) -> Option<&'src str> {
        self.parent
    }

    /// Position of the enclosing boundary in [`SourceStructure::nodes`].
    ///
    /// Always smaller than this node's own position, so walking down from
    /// the root terminates even when aliases repeat.
    pub fn parent_index(&self) -> Option<usize> {
        self.parent_index
    }

    /// 0-based index of the declaring line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based index of the line closing this boundary's block.
    ///
    /// `None` for leaves and for boundaries whose block is never closed.
    pub fn closing_line(&self) -> Option<usize> {
        self.closing_line
    }

    /// Returns `true` if the declaring line opened a block.
    pub fn is_boundary(&self) -> bool {
        self.opens_block
    }
}

/// The structural model of one diagram source.
#[derive(Debug, Clone)]
pub struct SourceStructure<'src> {
    source: &'src str,
    lines: Vec<&'src str>,
    line_offsets: Vec<usize>,
    nodes: Vec<EntityNode<'src>>,
    boundaries: Vec<usize>,
    aliases: IndexSet<&'src str>,
    stray_closings: Vec<usize>,
}

impl<'src> SourceStructure<'src> {
    /// The text this structure was built from.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// The source split into lines, without line terminators.
    ///
    /// A `\r` preceding a `\n` is treated as part of the terminator.
    pub fn lines(&self) -> &[&'src str] {
        &self.lines
    }

    /// Every declared element, in order of appearance.
    pub fn nodes(&self) -> &[EntityNode<'src>] {
        &self.nodes
    }

    /// The elements that opened a block, in order of appearance.
    pub fn boundaries(&self) -> impl Iterator<Item = &EntityNode<'src>> + '_ {
        self.boundaries.iter().map(|&index| &self.nodes[index])
    }

    /// Every declared alias, in order of first appearance.
    pub fn aliases(&self) -> &IndexSet<&'src str> {
        &self.aliases
    }

    /// Returns `true` if `alias` is declared anywhere in the document.
    pub fn contains_alias(&self, alias: &str) -> bool {
        self.aliases.contains(alias)
    }

    /// The first element declared with `alias`.
    pub fn node(&self, alias: &str) -> Option<&EntityNode<'src>> {
        self.nodes.iter().find(|node| node.alias == alias)
    }

    /// The first boundary declared with `alias`.
    pub fn boundary(&self, alias: &str) -> Option<&EntityNode<'src>> {
        self.boundaries().find(|node| node.alias == alias)
    }

    /// Direct children of the boundary `parent`, or top-level elements for `None`.
    pub fn children<'a>(
        &'a self,
        parent: Option<&'a str>,
    ) -> impl Iterator<Item = &'a EntityNode<'src>> + 'a {
        self.nodes.iter().filter(move |node| node.parent == parent)
    }

    /// Direct children of the node at position `parent` in [`nodes`], or
    /// top-level elements for `None`, paired with their own positions.
    ///
    /// Unlike [`children`], this follows the nesting as written and does not
    /// merge boundaries that share an alias.
    ///
    /// [`nodes`]: Self::nodes
    /// [`children`]: Self::children
    pub fn children_at(
        &self,
        parent: Option<usize>,
    ) -> impl Iterator<Item = (usize, &EntityNode<'src>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.parent_index == parent)
    }

    /// Indices of `}` lines that closed nothing.
    pub fn stray_closings(&self) -> &[usize] {
        &self.stray_closings
    }

    /// Span covering the trimmed content of line `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a line of this source.
    pub fn line_span(&self, index: usize) -> Span {
        let line = self.lines[index];
        let offset = self.line_offsets[index];
        let leading = line.len() - line.trim_start().len();
        let end = offset + line.trim_end().len();
        Span::new((offset + leading).min(end)..end)
    }

    /// Options for choosing where a new element goes: the document root
    /// (`None`) followed by every boundary.
    pub fn parent_options(&self) -> Vec<Option<&EntityNode<'src>>> {
        std::iter::once(None)
            .chain(self.boundaries().map(Some))
            .collect()
    }

    /// Options for choosing relation endpoints: one element per alias, the
    /// first declaration winning.
    pub fn node_options(&self) -> Vec<&EntityNode<'src>> {
        self.aliases
            .iter()
            .filter_map(|alias| self.node(alias))
            .collect()
    }
}

/// Build the structural model of `source`.
///
/// Never fails: malformed or partial text simply yields fewer elements.
///
/// # Example
///
/// ```
/// # use c4pad_parser::parse;
/// let source = r#"
/// Person(u, "User")
/// System_Boundary(sb, "Shop") {
///   Container(web, "Web")
/// }
/// Rel(u, web, "uses")
/// "#;
///
/// let structure = parse(source);
/// assert_eq!(structure.nodes().len(), 3);
/// assert_eq!(structure.node("web").and_then(|n| n.parent()), Some("sb"));
/// assert!(!structure.contains_alias("Rel"));
/// ```
pub fn parse(source: &str) -> SourceStructure<'_> {
    let (lines, line_offsets) = split_lines(source);

    // Pass 1: classify each line independently.
    let classified: Vec<Line<'_>> = lines.iter().map(|&text| line::classify(text)).collect();

    // Pass 2: fold the classified lines with a stack of open boundaries.
    let mut nodes: Vec<EntityNode<'_>> = Vec::new();
    let mut boundaries = Vec::new();
    let mut aliases = IndexSet::new();
    let mut stray_closings = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for (index, classified) in classified.into_iter().enumerate() {
        match classified {
            Line::Macro(call) if call.is_relation() => {
                trace!(line = index, name = call.name(); "Skipping relation");
            }
            Line::Macro(call) => {
                let parent_index = stack.last().copied();
                let parent = parent_index.map(|open| nodes[open].alias);
                trace!(
                    line = index,
                    alias = call.alias(),
                    parent:?;
                    "Declared element"
                );

                aliases.insert(call.alias());
                if call.opens_block() {
                    boundaries.push(nodes.len());
                    stack.push(nodes.len());
                }
                nodes.push(EntityNode {
                    alias: call.alias(),
                    label: call.label(),
                    macro_name: call.name(),
                    parent,
                    parent_index,
                    line: index,
                    closing_line: None,
                    opens_block: call.opens_block(),
                });
            }
            Line::BlockEnd => match stack.pop() {
                Some(open) => nodes[open].closing_line = Some(index),
                None => {
                    trace!(line = index; "Ignoring unmatched closing brace");
                    stray_closings.push(index);
                }
            },
            Line::Directive | Line::Text => {}
        }
    }

    debug!(
        lines = lines.len(),
        nodes = nodes.len(),
        boundaries = boundaries.len(),
        unclosed = stack.len();
        "Parsed source structure"
    );

    SourceStructure {
        source,
        lines,
        line_offsets,
        nodes,
        boundaries,
        aliases,
        stray_closings,
    }
}

/// Split on `\n`, dropping a `\r` that precedes it, and record each line's
/// byte offset.
fn split_lines(source: &str) -> (Vec<&str>, Vec<usize>) {
    let mut lines = Vec::new();
    let mut offsets = Vec::new();
    let mut offset = 0;

    for raw in source.split('\n') {
        offsets.push(offset);
        lines.push(raw.strip_suffix('\r').unwrap_or(raw));
        offset += raw.len() + 1;
    }

    (lines, offsets)
}
