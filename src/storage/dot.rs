//! Graphviz DOT 导出

use crate::error::Result;
use crate::graph::Graph;
use crate::types::{Properties, PropertyValue};
use petgraph::EdgeType;
use std::io::Write;

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// DOT 关键字（不区分大小写），不能作为裸标识符
const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

fn is_keyword(s: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(s))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn key(s: &str) -> String {
    if is_identifier(s) && !is_keyword(s) {
        s.to_string()
    } else {
        escape(s)
    }
}

fn value(v: &PropertyValue) -> String {
    escape(&v.to_string())
}

/// 按键排序的 `k=v` 列表
fn attr_list(props: &Properties) -> String {
    let mut keys: Vec<&String> = props.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|k| format!("{}={}", key(k), value(&props[k.as_str()])))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 输出 DOT 格式
pub fn write_dot<W: Write, Ty: EdgeType>(w: &mut W, g: &Graph<Ty>) -> Result<()> {
    let (kind, arrow) = if g.is_directed() {
        ("digraph", "->")
    } else {
        ("graph", "--")
    };
    writeln!(w, "{} G {{", kind)?;

    if !g.graph_props_map().is_empty() {
        writeln!(w, "    graph [{}];", attr_list(g.graph_props_map()))?;
    }

    let vprops = g.vertex_props_map();
    for v in g.vertices() {
        match vprops.get(&v) {
            Some(p) if !p.is_empty() => writeln!(w, "    {} [{}];", v, attr_list(p))?,
            _ => writeln!(w, "    {};", v)?,
        }
    }

    let eprops = g.edge_props_map();
    for e in g.edges() {
        match eprops.get(&e) {
            Some(p) if !p.is_empty() => {
                writeln!(w, "    {} {} {} [{}];", e.src, arrow, e.dst, attr_list(p))?
            }
            _ => writeln!(w, "    {} {} {};", e.src, arrow, e.dst)?,
        }
    }

    writeln!(w, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Element, MetaDiGraph, MetaGraph, VertexId};

    fn render<Ty: EdgeType>(g: &Graph<Ty>) -> String {
        let mut buf = Vec::new();
        write_dot(&mut buf, g).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_dot() {
        let mut g = MetaGraph::with_vertices(3);
        g.add_edge(1u32, 0u32);
        g.set_prop(Element::Graph, "label", "demo").unwrap();
        g.set_prop(VertexId::new(0), "name", "alice").unwrap();
        g.set_prop(VertexId::new(0), "age", 30).unwrap();
        g.set_prop((0, 1), "weight", 1.5).unwrap();

        let dot = render(&g);
        assert_eq!(
            dot,
            "graph G {\n    graph [label=\"demo\"];\n    0 [age=\"30\", name=\"alice\"];\n    1;\n    2;\n    0 -- 1 [weight=\"1.5\"];\n}\n"
        );
    }

    #[test]
    fn test_dot_escaping() {
        let mut g = MetaDiGraph::with_vertices(1);
        g.set_prop(VertexId::new(0), "two words", "say \"hi\"\\now\n").unwrap();

        let dot = render(&g);
        assert!(dot.starts_with("digraph G {"));
        assert!(dot.contains("0 [\"two words\"=\"say \\\"hi\\\"\\\\now\\n\"];"));
    }

    #[test]
    fn test_dot_quotes_keyword_keys() {
        let mut g = MetaGraph::with_vertices(1);
        g.set_prop(VertexId::new(0), "node", "x").unwrap();
        g.set_prop(VertexId::new(0), "Strict", "y").unwrap();
        g.set_prop(VertexId::new(0), "nodes", "z").unwrap();

        let dot = render(&g);
        assert!(dot.contains("0 [\"Strict\"=\"y\", \"node\"=\"x\", nodes=\"z\"];"));
    }
}
