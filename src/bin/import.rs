//! MetaGraph 数据导入工具
//!
//! 从 CSV 或 JSON Lines 文件批量导入顶点和边，并保存为快照

use anyhow::{bail, Context, Result};
use clap::Parser;
use metagraph::graph::Graph;
use metagraph::import::{BatchImporter, DEFAULT_KEY_PROPERTY};
use metagraph::storage::{self, Format};
use petgraph::{Directed, EdgeType, Undirected};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "metagraph-import")]
#[command(about = "MetaGraph 数据导入工具")]
struct Args {
    /// 顶点 CSV 文件
    #[arg(long)]
    vertices: Option<PathBuf>,

    /// 边 CSV 文件（src,dst,...）
    #[arg(long)]
    edges: Option<PathBuf>,

    /// JSON Lines 文件
    #[arg(long)]
    jsonl: Option<PathBuf>,

    /// 标识顶点的键属性
    #[arg(short, long, default_value = DEFAULT_KEY_PROPERTY)]
    key: String,

    /// 输出文件 (.mg / .json / .dot / .gv)
    #[arg(short, long)]
    output: PathBuf,

    /// 导入为有向图
    #[arg(short, long)]
    directed: bool,

    /// 批次大小
    #[arg(short, long, default_value = "10000")]
    batch_size: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if args.vertices.is_none() && args.edges.is_none() && args.jsonl.is_none() {
        bail!("至少需要 --vertices、--edges 或 --jsonl 之一");
    }
    let format = match Format::from_path(&args.output) {
        Some(f) => f,
        None => bail!("无法识别的输出格式: {}", args.output.display()),
    };

    if args.directed {
        run::<Directed>(&args, format)
    } else {
        run::<Undirected>(&args, format)
    }
}

fn run<Ty: EdgeType>(args: &Args, format: Format) -> Result<()> {
    let mut graph = Graph::<Ty>::new();
    let stats = {
        let mut importer = BatchImporter::with_key_property(&mut graph, args.key.as_str())?
            .with_batch_size(args.batch_size);
        importer.import_all(
            args.vertices.as_deref(),
            args.edges.as_deref(),
            args.jsonl.as_deref(),
        )?
    };

    storage::save(&args.output, &graph, format)
        .with_context(|| format!("无法写入 {}", args.output.display()))?;

    info!(
        vertices = stats.vertices_imported,
        edges = stats.edges_imported,
        errors = stats.errors,
        duration_ms = stats.duration_ms,
        "导入完成"
    );
    println!("\n导入完成!");
    println!("  顶点导入: {}", stats.vertices_imported);
    println!("  边导入: {}", stats.edges_imported);
    println!("  错误数: {}", stats.errors);
    println!("  耗时: {} ms", stats.duration_ms);
    println!("\n{}", graph);

    Ok(())
}
