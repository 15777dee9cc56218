//! MetaGraph CLI 工具
//!
//! 交互式命令行界面

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use metagraph::cli::{CommandCompleter, CommandResult, PrintMode, Printer, Session};
use metagraph::graph::Graph;
use metagraph::storage;
use petgraph::{Directed, EdgeType, Undirected};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "metagraph-cli")]
#[command(about = "MetaGraph 命令行工具")]
struct Args {
    /// 启动时加载的快照文件 (.mg / .json)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// 使用有向图
    #[arg(short, long)]
    directed: bool,

    /// 默认边权重
    #[arg(short = 'w', long)]
    default_weight: Option<f64>,

    /// 以垂直格式输出表格
    #[arg(long)]
    vertical: bool,

    /// 执行单个命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.directed {
        run::<Directed>(args)
    } else {
        run::<Undirected>(args)
    }
}

fn run<Ty: EdgeType>(args: Args) -> Result<()> {
    let mut graph: Graph<Ty> = match &args.file {
        Some(path) => {
            storage::load(path).with_context(|| format!("无法加载 {}", path.display()))?
        }
        None => Graph::new(),
    };
    if let Some(w) = args.default_weight {
        graph.set_default_weight(w);
    }

    let mode = if args.vertical {
        PrintMode::Vertical
    } else {
        PrintMode::Table
    };
    let mut session = Session::new(graph, Printer::new(mode));

    // 单个命令模式
    if let Some(cmd) = args.execute {
        if let CommandResult::Error(e) = session.execute_line(&cmd) {
            bail!(e);
        }
        return Ok(());
    }

    println!("MetaGraph CLI");
    println!("=============");
    println!("{}", session.graph());
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let mut rl: Editor<CommandCompleter, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CommandCompleter::new()));

    let history = history_path();
    if let Some(path) = &history {
        // 首次运行时历史文件不存在
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline("metagraph> ") {
            Ok(input) => {
                let line = input.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;
                if !report(session.execute_line(line)) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        rl.save_history(path)?;
    }

    println!("再见！");
    Ok(())
}

/// 历史文件位置
fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("metagraph").join("history.txt"))
}

/// 输出命令结果，返回是否继续
fn report(result: CommandResult) -> bool {
    match result {
        CommandResult::Continue => true,
        CommandResult::Exit => false,
        CommandResult::Message(m) => {
            println!("{}", m);
            true
        }
        CommandResult::Error(e) => {
            println!("{} {}", "错误:".red().bold(), e);
            true
        }
    }
}
