//! DOT export — serialize a social graph as a Graphviz digraph.
//!
//! This is the boundary a presentation layer consumes: vertex style follows
//! the user's `Tag`, edge style follows the `Relationship` variant.
//!
//! ```text
//! SocialGraph → write_dot() → digraph { ... } → dot -Tsvg
//! ```

use std::io::Write;

use crate::graph::Digraph;
use crate::model::{Relationship, Tag, User};
use crate::Result;

/// Write the graph as a DOT script. Vertices and edges are emitted in
/// ascending user-id order.
pub fn write_dot<G>(graph: &G, writer: &mut dyn Write) -> Result<()>
where
    G: Digraph<User, Relationship>,
{
    let mut users = Vec::with_capacity(graph.vertex_count());
    for v in graph.vertices() {
        users.push(graph.element(v)?);
    }
    users.sort_by_key(|u| u.id);

    let mut edges = Vec::with_capacity(graph.edge_count());
    for e in graph.edges() {
        let (source, target) = graph.endpoints(e)?;
        edges.push((graph.element(source)?.id, graph.element(target)?.id, graph.payload(e)?));
    }
    edges.sort_by_key(|&(s, t, _)| (s, t));

    // Header
    writeln!(writer, "digraph social {{")?;
    writeln!(writer, "  // users: {}", users.len())?;
    writeln!(writer, "  // relationships: {}", edges.len())?;

    for user in &users {
        writeln!(
            writer,
            "  u{} [label=\"{}\", {}];",
            user.id,
            escape(&user.name),
            vertex_style(user.tag),
        )?;
    }

    for (source, target, relationship) in edges {
        writeln!(writer, "  u{source} -> u{target} [{}];", edge_style(relationship))?;
    }

    writeln!(writer, "}}")?;
    Ok(())
}

fn vertex_style(tag: Tag) -> &'static str {
    match tag {
        Tag::Added => "style=filled, fillcolor=\"#4f81bd\"",
        Tag::Included => "style=dashed",
    }
}

fn edge_style(relationship: &Relationship) -> String {
    match relationship {
        Relationship::Simple => "color=gray".to_string(),
        Relationship::Indirect(shared) => {
            let ids: Vec<String> = shared.iter().map(|i| i.to_string()).collect();
            format!("color=orange, label=\"{}\"", ids.join(","))
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
