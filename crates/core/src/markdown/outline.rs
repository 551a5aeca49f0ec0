//! Tree view over a flat heading list.

use super::types::HeadingBlock;

/// A heading with the headings nested below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode<'a> {
    pub block: &'a HeadingBlock,
    pub children: Vec<OutlineNode<'a>>,
}

impl<'a> OutlineNode<'a> {
    /// Depth-first `(depth, block)` pairs for this node and its descendants.
    pub fn flatten(&self, depth: usize, out: &mut Vec<(usize, &'a HeadingBlock)>) {
        out.push((depth, self.block));
        for child in &self.children {
            child.flatten(depth + 1, out);
        }
    }
}

/// Build the heading tree: a block is a child of the closest preceding block
/// with a smaller level.
pub fn outline(blocks: &[HeadingBlock]) -> Vec<OutlineNode<'_>> {
    let mut index = 0;
    build(blocks, &mut index, 0)
}

fn build<'a>(
    blocks: &'a [HeadingBlock],
    index: &mut usize,
    parent_level: u8,
) -> Vec<OutlineNode<'a>> {
    let mut nodes = Vec::new();
    while let Some(block) = blocks.get(*index) {
        if block.level() <= parent_level {
            break;
        }
        *index += 1;
        let children = build(blocks, index, block.level());
        nodes.push(OutlineNode { block, children });
    }
    nodes
}

/// Depth-first `(depth, block)` pairs for a whole outline.
pub fn flatten<'a>(nodes: &[OutlineNode<'a>]) -> Vec<(usize, &'a HeadingBlock)> {
    let mut out = Vec::new();
    for node in nodes {
        node.flatten(0, &mut out);
    }
    out
}
