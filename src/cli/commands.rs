//! 控制台命令解析与执行
//!
//! 命令目标写作 `g`（图）、`v <id>`（顶点）或 `e <src> <dst>`（边）

use std::path::PathBuf;

use petgraph::EdgeType;

use super::printer::Printer;
use crate::error::{Error, Result};
use crate::graph::{Edge, Element, Graph, VertexId};
use crate::metrics::global_metrics;
use crate::storage::{self, Format};
use crate::types::PropertyValue;

/// 控制台命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Info,
    Stats,
    AddVertices(usize),
    AddEdge(VertexId, VertexId),
    RemVertex(VertexId),
    RemEdge(VertexId, VertexId),
    Neighbors(VertexId),
    Set {
        target: Element,
        prop: String,
        value: PropertyValue,
    },
    Get {
        target: Element,
        prop: String,
    },
    Props(Element),
    Rm {
        target: Element,
        prop: String,
    },
    Clear(Element),
    Index(String),
    SetIndex {
        vertex: VertexId,
        prop: String,
        value: PropertyValue,
    },
    Lookup {
        prop: String,
        value: PropertyValue,
    },
    FilterVertices {
        prop: String,
        value: Option<PropertyValue>,
    },
    FilterEdges {
        prop: String,
        value: Option<PropertyValue>,
    },
    WeightField(Option<String>),
    DefaultWeight(Option<f64>),
    Path(VertexId, VertexId),
    Save(PathBuf),
    Load(PathBuf),
}

/// 控制台命令执行结果
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 依次切出最多 `n` 个空白分隔的词，返回这些词和剩余文本
fn take_tokens(input: &str, n: usize) -> (Vec<&str>, &str) {
    let mut rest = input.trim_start();
    let mut tokens = Vec::with_capacity(n);
    while tokens.len() < n && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    (tokens, rest.trim_end())
}

fn usage(text: &str) -> Error {
    Error::ParseError(format!("用法: {}", text))
}

fn parse_vertex(token: Option<&&str>, usage_text: &str) -> Result<VertexId> {
    token
        .and_then(|t| t.parse::<u32>().ok())
        .map(VertexId::new)
        .ok_or_else(|| usage(usage_text))
}

fn parse_two_vertices(input: &str, usage_text: &str) -> Result<(VertexId, VertexId)> {
    let (ids, rest) = take_tokens(input, 2);
    if !rest.is_empty() {
        return Err(usage(usage_text));
    }
    Ok((
        parse_vertex(ids.first(), usage_text)?,
        parse_vertex(ids.get(1), usage_text)?,
    ))
}

/// 解析命令目标，返回目标和剩余文本
fn parse_target<'a>(input: &'a str, usage_text: &str) -> Result<(Element, &'a str)> {
    let (kind, rest) = take_tokens(input, 1);
    match kind.first().map(|k| k.to_lowercase()).as_deref() {
        Some("g") | Some("graph") => Ok((Element::Graph, rest)),
        Some("v") | Some("vertex") => {
            let (ids, rest) = take_tokens(rest, 1);
            Ok((Element::Vertex(parse_vertex(ids.first(), usage_text)?), rest))
        }
        Some("e") | Some("edge") => {
            let (ids, rest) = take_tokens(rest, 2);
            let src = parse_vertex(ids.first(), usage_text)?;
            let dst = parse_vertex(ids.get(1), usage_text)?;
            Ok((Element::Edge(Edge::new(src, dst)), rest))
        }
        _ => Err(usage(usage_text)),
    }
}

fn parse_prop_and_value(input: &str, usage_text: &str) -> Result<(String, PropertyValue)> {
    let (prop, value) = take_tokens(input, 1);
    match prop.first() {
        Some(p) if !value.is_empty() => Ok((p.to_string(), PropertyValue::parse_literal(value))),
        _ => Err(usage(usage_text)),
    }
}

fn parse_prop_filter(input: &str, usage_text: &str) -> Result<(String, Option<PropertyValue>)> {
    let (prop, value) = take_tokens(input, 1);
    let prop = prop.first().ok_or_else(|| usage(usage_text))?.to_string();
    let value = (!value.is_empty()).then(|| PropertyValue::parse_literal(value));
    Ok((prop, value))
}

fn parse_single_prop(input: &str, usage_text: &str) -> Result<String> {
    let (prop, rest) = take_tokens(input, 1);
    match prop.first() {
        Some(p) if rest.is_empty() => Ok(p.to_string()),
        _ => Err(usage(usage_text)),
    }
}

/// 解析一行命令
pub fn parse_command(input: &str) -> Result<Command> {
    let (head, args) = take_tokens(input, 1);
    let cmd = head
        .first()
        .map(|c| c.to_lowercase())
        .ok_or_else(|| Error::ParseError("空命令".to_string()))?;

    let command = match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "info" => Command::Info,
        "stats" => Command::Stats,
        "addv" => {
            if args.is_empty() {
                Command::AddVertices(1)
            } else {
                let n = args.parse::<usize>().map_err(|_| usage("addv [n]"))?;
                Command::AddVertices(n)
            }
        }
        "adde" => {
            let (s, d) = parse_two_vertices(args, "adde <src> <dst>")?;
            Command::AddEdge(s, d)
        }
        "remv" => {
            let (ids, rest) = take_tokens(args, 1);
            if !rest.is_empty() {
                return Err(usage("remv <v>"));
            }
            Command::RemVertex(parse_vertex(ids.first(), "remv <v>")?)
        }
        "reme" => {
            let (s, d) = parse_two_vertices(args, "reme <src> <dst>")?;
            Command::RemEdge(s, d)
        }
        "neighbors" | "n" => {
            let (ids, _) = take_tokens(args, 1);
            Command::Neighbors(parse_vertex(ids.first(), "neighbors <v>")?)
        }
        "set" => {
            const USAGE: &str = "set <target> <prop> <value>";
            let (target, rest) = parse_target(args, USAGE)?;
            let (prop, value) = parse_prop_and_value(rest, USAGE)?;
            Command::Set { target, prop, value }
        }
        "get" => {
            const USAGE: &str = "get <target> <prop>";
            let (target, rest) = parse_target(args, USAGE)?;
            Command::Get {
                target,
                prop: parse_single_prop(rest, USAGE)?,
            }
        }
        "props" => {
            let (target, rest) = parse_target(args, "props <target>")?;
            if !rest.is_empty() {
                return Err(usage("props <target>"));
            }
            Command::Props(target)
        }
        "rm" => {
            const USAGE: &str = "rm <target> <prop>";
            let (target, rest) = parse_target(args, USAGE)?;
            Command::Rm {
                target,
                prop: parse_single_prop(rest, USAGE)?,
            }
        }
        "clear" => {
            let (target, rest) = parse_target(args, "clear <target>")?;
            if !rest.is_empty() {
                return Err(usage("clear <target>"));
            }
            Command::Clear(target)
        }
        "index" => Command::Index(parse_single_prop(args, "index <prop>")?),
        "setindex" => {
            const USAGE: &str = "setindex <v> <prop> <value>";
            let (ids, rest) = take_tokens(args, 1);
            let vertex = parse_vertex(ids.first(), USAGE)?;
            let (prop, value) = parse_prop_and_value(rest, USAGE)?;
            Command::SetIndex { vertex, prop, value }
        }
        "lookup" => {
            let (prop, value) = parse_prop_and_value(args, "lookup <prop> <value>")?;
            Command::Lookup { prop, value }
        }
        "filterv" => {
            let (prop, value) = parse_prop_filter(args, "filterv <prop> [value]")?;
            Command::FilterVertices { prop, value }
        }
        "filtere" => {
            let (prop, value) = parse_prop_filter(args, "filtere <prop> [value]")?;
            Command::FilterEdges { prop, value }
        }
        "weightfield" => {
            let (prop, rest) = take_tokens(args, 1);
            if !rest.is_empty() {
                return Err(usage("weightfield [prop]"));
            }
            Command::WeightField(prop.first().map(|p| p.to_string()))
        }
        "defaultweight" => {
            if args.is_empty() {
                Command::DefaultWeight(None)
            } else {
                let w = args
                    .parse::<f64>()
                    .map_err(|_| usage("defaultweight [w]"))?;
                Command::DefaultWeight(Some(w))
            }
        }
        "path" => {
            let (s, d) = parse_two_vertices(args, "path <src> <dst>")?;
            Command::Path(s, d)
        }
        "save" | "load" => {
            if args.is_empty() {
                return Err(usage(&format!("{} <file>", cmd)));
            }
            let path = PathBuf::from(args);
            if cmd == "save" {
                Command::Save(path)
            } else {
                Command::Load(path)
            }
        }
        other => {
            return Err(Error::ParseError(format!(
                "未知命令: {}。输入 'help' 查看帮助。",
                other
            )))
        }
    };
    Ok(command)
}

/// 控制台会话
pub struct Session<Ty: EdgeType> {
    graph: Graph<Ty>,
    printer: Printer,
}

impl<Ty: EdgeType> Session<Ty> {
    pub fn new(graph: Graph<Ty>, printer: Printer) -> Self {
        Self { graph, printer }
    }

    pub fn graph(&self) -> &Graph<Ty> {
        &self.graph
    }

    /// 解析并执行一行输入
    pub fn execute_line(&mut self, input: &str) -> CommandResult {
        if input.trim().is_empty() {
            return CommandResult::Continue;
        }
        match parse_command(input) {
            Ok(cmd) => self.execute(cmd),
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }

    /// 执行命令
    pub fn execute(&mut self, cmd: Command) -> CommandResult {
        match self.run(cmd) {
            Ok(result) => result,
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }

    fn run(&mut self, cmd: Command) -> Result<CommandResult> {
        let g = &mut self.graph;
        let msg = |s: String| Ok(CommandResult::Message(s));

        match cmd {
            Command::Help => msg(get_help_text()),
            Command::Quit => Ok(CommandResult::Exit),
            Command::Info => msg(self.printer.print_info(g)),
            Command::Stats => msg(self.printer.print_metrics(&global_metrics().snapshot())),

            Command::AddVertices(n) => {
                let first = g.vertex_count();
                g.add_vertices(n);
                if n == 1 {
                    msg(format!("已添加顶点 {}", first))
                } else {
                    msg(format!("已添加 {} 个顶点 ({}..{})", n, first, g.vertex_count()))
                }
            }
            Command::AddEdge(s, d) => {
                if g.add_edge(s, d) {
                    msg(format!("已添加边 {} -> {}", s, d))
                } else {
                    Ok(CommandResult::Error("端点不存在或边已存在".to_string()))
                }
            }
            Command::RemVertex(v) => {
                if g.rem_vertex(v) {
                    msg(format!("已删除顶点 {}", v))
                } else {
                    Err(Error::VertexNotFound(v.to_string()))
                }
            }
            Command::RemEdge(s, d) => {
                if g.rem_edge(s, d) {
                    msg(format!("已删除边 {} -> {}", s, d))
                } else {
                    Err(Error::EdgeNotFound(Edge::new(s, d).to_string()))
                }
            }
            Command::Neighbors(v) => {
                if !g.has_vertex(v) {
                    return Err(Error::VertexNotFound(v.to_string()));
                }
                msg(join_ids(g.neighbors(v)))
            }

            Command::Set { target, prop, value } => {
                if g.set_prop(target, &prop, value)? {
                    msg("OK".to_string())
                } else {
                    Err(missing(target))
                }
            }
            Command::Get { target, prop } => {
                let value = g.get_prop(target, &prop)?;
                msg(format!("{} ({})", value, value.type_name()))
            }
            Command::Props(target) => msg(self.printer.print_props(g.props(target))),
            Command::Rm { target, prop } => {
                g.rem_prop(target, &prop);
                msg("OK".to_string())
            }
            Command::Clear(target) => {
                g.clear_props(target);
                msg("OK".to_string())
            }

            Command::Index(prop) => {
                let props = g.set_indexing_prop(&prop)?;
                msg(format!("索引属性: {}", join_names(props.iter())))
            }
            Command::SetIndex { vertex, prop, value } => {
                let props = g.set_indexing_prop_value(vertex, &prop, value)?;
                msg(format!("索引属性: {}", join_names(props.iter())))
            }
            Command::Lookup { prop, value } => {
                let v = g.vertex_by_index(&prop, &value)?;
                msg(format!("顶点 {}", v))
            }

            Command::FilterVertices { prop, value } => {
                let found: Vec<VertexId> = g.filter_vertices_by_prop(&prop, value.as_ref()).collect();
                msg(format!("{} 个顶点: {}", found.len(), join_ids(found)))
            }
            Command::FilterEdges { prop, value } => {
                let found: Vec<String> = g
                    .filter_edges_by_prop(&prop, value.as_ref())
                    .map(|e| format!("{}-{}", e.src, e.dst))
                    .collect();
                msg(format!("{} 条边: {}", found.len(), found.join(", ")))
            }

            Command::WeightField(None) => msg(format!(":{}", g.weight_field())),
            Command::WeightField(Some(field)) => {
                g.set_weight_field(field);
                msg(format!("权重字段: :{}", g.weight_field()))
            }
            Command::DefaultWeight(None) => msg(format!("{:?}", g.default_weight())),
            Command::DefaultWeight(Some(w)) => {
                g.set_default_weight(w);
                msg(format!("默认权重: {:?}", w))
            }
            Command::Path(s, d) => match g.shortest_path(s, d) {
                Some((cost, path)) => {
                    let hops: Vec<String> = path.iter().map(|v| v.to_string()).collect();
                    msg(format!("路径: {} (总权重 {})", hops.join(" -> "), cost))
                }
                None => msg("未找到路径".to_string()),
            },

            Command::Save(path) => {
                let format = Format::from_path(&path).ok_or_else(|| {
                    Error::StorageError(format!("无法识别的文件格式: {}", path.display()))
                })?;
                storage::save(&path, g, format)?;
                msg(format!("已保存到 {}", path.display()))
            }
            Command::Load(path) => {
                *g = storage::load(&path)?;
                msg(format!("已加载 {}: {}", path.display(), g))
            }
        }
    }
}

fn missing(target: Element) -> Error {
    match target {
        Element::Edge(e) => Error::EdgeNotFound(e.to_string()),
        Element::Vertex(v) => Error::VertexNotFound(v.to_string()),
        Element::Graph => Error::ParseError("graph".to_string()),
    }
}

fn join_ids(ids: Vec<VertexId>) -> String {
    ids.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_names<'a>(names: impl Iterator<Item = &'a String>) -> String {
    names.map(|n| format!(":{}", n)).collect::<Vec<_>>().join(", ")
}

pub fn get_help_text() -> String {
    r#"
╔═══════════════════════════════════════════════════════════════╗
║                    MetaGraph Commands                         ║
╠═══════════════════════════════════════════════════════════════╣
║ help, h, ?                 Show this help                     ║
║ quit, exit, q              Exit the program                   ║
║ info                       Show graph summary                 ║
║ stats                      Show operation counters            ║
╠═══════════════════════════════════════════════════════════════╣
║ addv [n]                   Add n vertices (default 1)         ║
║ adde <s> <d>               Add edge                           ║
║ remv <v>                   Remove vertex (last one moves in)  ║
║ reme <s> <d>               Remove edge                        ║
║ neighbors <v>              List neighbors                     ║
╠═══════════════════════════════════════════════════════════════╣
║ target: g | v <id> | e <s> <d>                                ║
║ set <target> <prop> <val>  Set property                       ║
║ get <target> <prop>        Get property                       ║
║ props <target>             List all properties                ║
║ rm <target> <prop>         Remove property                    ║
║ clear <target>             Remove all properties              ║
╠═══════════════════════════════════════════════════════════════╣
║ index <prop>               Make prop an indexing property     ║
║ setindex <v> <prop> <val>  Set indexing value of a vertex     ║
║ lookup <prop> <val>        Find vertex by indexing value      ║
║ filterv <prop> [val]       Vertices having prop (= val)       ║
║ filtere <prop> [val]       Edges having prop (= val)          ║
╠═══════════════════════════════════════════════════════════════╣
║ weightfield [prop]         Show or set the weight field       ║
║ defaultweight [w]          Show or set the default weight     ║
║ path <s> <d>               Weighted shortest path             ║
╠═══════════════════════════════════════════════════════════════╣
║ save <file>                Save (.mg, .json, .dot, .gv)       ║
║ load <file>                Load (.mg, .json)                  ║
╚═══════════════════════════════════════════════════════════════╝
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MetaGraph;
    use crate::cli::PrintMode;
    use tempfile::TempDir;

    fn session() -> Session<petgraph::Undirected> {
        Session::new(MetaGraph::with_vertices(3), Printer::new(PrintMode::Table))
    }

    fn message(result: CommandResult) -> String {
        match result {
            CommandResult::Message(m) => m,
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_take_tokens() {
        assert_eq!(take_tokens("  set v 1  name  ", 2), (vec!["set", "v"], "1  name"));
        assert_eq!(take_tokens("a", 3), (vec!["a"], ""));
    }

    #[test]
    fn test_parse_targets() {
        assert_eq!(
            parse_command("get g title").unwrap(),
            Command::Get {
                target: Element::Graph,
                prop: "title".to_string()
            }
        );
        assert_eq!(
            parse_command("set e 1 2 weight 0.5").unwrap(),
            Command::Set {
                target: Element::Edge(Edge::new(1, 2)),
                prop: "weight".to_string(),
                value: PropertyValue::Float(0.5),
            }
        );
        assert_eq!(
            parse_command("SET v 0 name \"John Smith\"").unwrap(),
            Command::Set {
                target: Element::Vertex(VertexId::new(0)),
                prop: "name".to_string(),
                value: PropertyValue::from("John Smith"),
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_command(""), Err(Error::ParseError(_))));
        assert!(matches!(parse_command("set v x name 1"), Err(Error::ParseError(_))));
        assert!(matches!(parse_command("set v 1 name"), Err(Error::ParseError(_))));
        assert!(matches!(parse_command("adde 1"), Err(Error::ParseError(_))));
        assert!(matches!(parse_command("frobnicate"), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_parse_optional_args() {
        assert_eq!(parse_command("addv").unwrap(), Command::AddVertices(1));
        assert_eq!(parse_command("addv 5").unwrap(), Command::AddVertices(5));
        assert_eq!(parse_command("weightfield").unwrap(), Command::WeightField(None));
        assert_eq!(
            parse_command("defaultweight 2.5").unwrap(),
            Command::DefaultWeight(Some(2.5))
        );
        assert_eq!(
            parse_command("filterv kind").unwrap(),
            Command::FilterVertices {
                prop: "kind".to_string(),
                value: None
            }
        );
        assert_eq!(
            parse_command("save out/graph.mg").unwrap(),
            Command::Save(PathBuf::from("out/graph.mg"))
        );
    }

    #[test]
    fn test_session_properties() {
        let mut s = session();
        assert_eq!(message(s.execute_line("set v 0 name alice")), "OK");
        assert_eq!(message(s.execute_line("get v 0 name")), "alice (string)");
        assert!(matches!(s.execute_line("set v 9 name ghost"), CommandResult::Error(_)));
        assert!(matches!(s.execute_line("get v 1 name"), CommandResult::Error(_)));
        assert_eq!(s.execute_line("   "), CommandResult::Continue);
        assert_eq!(s.execute_line("quit"), CommandResult::Exit);
    }

    #[test]
    fn test_session_indexing() {
        let mut s = session();
        message(s.execute_line("setindex 1 name bob"));
        assert_eq!(message(s.execute_line("lookup name bob")), "顶点 1");
        match s.execute_line("set v 1 name robert") {
            CommandResult::Error(e) => assert!(e.contains("set_indexing_prop")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_session_paths() {
        let mut s = session();
        message(s.execute_line("adde 0 1"));
        message(s.execute_line("adde 1 2"));
        message(s.execute_line("adde 0 2"));
        message(s.execute_line("set e 0 2 weight 5"));
        assert_eq!(
            message(s.execute_line("path 0 2")),
            "路径: 0 -> 1 -> 2 (总权重 2)"
        );
        message(s.execute_line("weightfield cost"));
        assert_eq!(message(s.execute_line("path 0 2")), "路径: 0 -> 2 (总权重 1)");
        assert_eq!(message(s.execute_line("filtere weight")), "1 条边: 0-2");
    }

    #[test]
    fn test_session_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.json");
        let mut s = session();
        message(s.execute_line("set g title demo"));
        message(s.execute_line(&format!("save {}", path.display())));
        message(s.execute_line("addv 4"));
        assert_eq!(s.graph().vertex_count(), 7);

        message(s.execute_line(&format!("load {}", path.display())));
        assert_eq!(s.graph().vertex_count(), 3);
        assert_eq!(message(s.execute_line("get g title")), "demo (string)");
        assert!(matches!(s.execute_line("save graph.txt"), CommandResult::Error(_)));
    }
}
