//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use petgraph::EdgeType;
use prettytable::{format, row, Cell, Row, Table};

use crate::graph::Graph;
use crate::metrics::MetricsSnapshot;
use crate::types::Properties;

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 打印行集
    pub fn print_rows(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        if columns.is_empty() || rows.is_empty() {
            return "Empty set\n".to_string();
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}{} row(s) in set\n", output, rows.len())
    }

    /// 表格格式
    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印属性表（按键排序）
    pub fn print_props(&self, props: &Properties) -> String {
        let mut keys: Vec<&String> = props.keys().collect();
        keys.sort();
        let rows: Vec<Vec<String>> = keys
            .into_iter()
            .map(|k| {
                let v = &props[k.as_str()];
                vec![k.clone(), v.to_string(), v.type_name().to_string()]
            })
            .collect();
        self.print_rows(&["Property", "Value", "Type"], &rows)
    }

    /// 打印图概况
    pub fn print_info<Ty: EdgeType>(&self, g: &Graph<Ty>) -> String {
        let indexing: Vec<String> = g.indexing_props().iter().map(|p| format!(":{}", p)).collect();
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", g.vertex_count().to_string()]);
        table.add_row(row!["Edge Count", g.edge_count().to_string()]);
        table.add_row(row!["Directed", g.is_directed().to_string()]);
        table.add_row(row!["Weight Field", format!(":{}", g.weight_field())]);
        table.add_row(row!["Default Weight", format!("{:?}", g.default_weight())]);
        table.add_row(row!["Indexing Props", indexing.join(", ")]);
        format!("{}\n{}", g, table)
    }

    /// 打印运行指标
    pub fn print_metrics(&self, s: &MetricsSnapshot) -> String {
        let rows = vec![
            vec!["property_reads".to_string(), s.property_reads.to_string()],
            vec!["property_writes".to_string(), s.property_writes.to_string()],
            vec!["property_removals".to_string(), s.property_removals.to_string()],
            vec!["rejected_writes".to_string(), s.rejected_writes.to_string()],
            vec!["index_lookups".to_string(), s.index_lookups.to_string()],
            vec!["index_misses".to_string(), s.index_misses.to_string()],
            vec!["index_hit_rate".to_string(), format!("{:.2}", s.index_hit_rate)],
            vec!["vertices_inserted".to_string(), s.vertices_inserted.to_string()],
            vec!["vertices_removed".to_string(), s.vertices_removed.to_string()],
            vec!["edges_inserted".to_string(), s.edges_inserted.to_string()],
            vec!["edges_removed".to_string(), s.edges_removed.to_string()],
            vec!["uptime_seconds".to_string(), s.uptime_seconds.to_string()],
        ];
        self.print_rows(&["Metric", "Value"], &rows)
    }
}
