use anyhow::{Context, Result};
use clap::Parser;
use flowgraph::{analyze_file, render_document, FunctionFlowchart};
use log::warn;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "flowgraph")]
#[command(author, version, about = "Render flowcharts for Rust functions", long_about = None)]
struct Args {
    /// Rust source file to analyze (default: every file in the crate)
    #[arg(short = 'i', long)]
    file: Option<PathBuf>,

    /// Output file path (default: DOT to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (dot, svg, png)
    #[arg(short = 'f', long, default_value = "dot")]
    format: String,

    /// Print the per-function operator tables as JSON instead of a diagram
    #[arg(long)]
    table: bool,
}

fn find_rust_files(path: &Path) -> Vec<PathBuf> {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path().extension().is_some_and(|ext| ext == "rs")
                && !e.path().components().any(|c| c.as_os_str() == "target")
        })
        .map(|e| e.path().to_path_buf())
        .collect()
}

fn find_crate_root() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        if current.join("Cargo.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            anyhow::bail!("could not find Cargo.toml in any parent directory");
        }
    }
}

fn collect_charts(args: &Args) -> Result<Vec<FunctionFlowchart>> {
    let files = match &args.file {
        Some(file) => {
            if !file.exists() {
                anyhow::bail!("input file does not exist: {}", file.display());
            }
            vec![file.clone()]
        }
        None => find_rust_files(&find_crate_root()?),
    };

    let mut charts = Vec::new();
    for file in files {
        match analyze_file(&file) {
            Ok(mut file_charts) => charts.append(&mut file_charts),
            Err(e) => warn!("skipping {}: {e:#}", file.display()),
        }
    }
    if charts.is_empty() {
        anyhow::bail!("no functions found or all analyses failed");
    }
    Ok(charts)
}

fn tables_as_json(charts: &[FunctionFlowchart]) -> Result<String> {
    let mut document = serde_json::Map::new();
    for chart in charts {
        let mut rows: Vec<_> = chart.table.iter().map(|(_, d)| d).collect();
        rows.sort_by(|a, b| a.label.cmp(&b.label));
        document.insert(chart.name.clone(), serde_json::to_value(rows)?);
    }
    Ok(serde_json::to_string_pretty(&document)?)
}

fn write_output(content: String, format: &str, output: &Path) -> Result<()> {
    match format {
        "dot" => std::fs::write(output, content)?,
        "svg" | "png" => {
            let temp_dot = output.with_extension("dot");
            std::fs::write(&temp_dot, content)?;

            let status = Command::new("dot")
                .arg(format!("-T{format}"))
                .arg(&temp_dot)
                .arg("-o")
                .arg(output)
                .status()
                .context("failed to execute dot; is Graphviz installed?")?;

            std::fs::remove_file(temp_dot)?;
            if !status.success() {
                anyhow::bail!("dot command failed");
            }
        }
        other => anyhow::bail!("unsupported output format: {other}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let charts = collect_charts(&args)?;
    let content = if args.table {
        tables_as_json(&charts)?
    } else {
        render_document(&charts)
    };

    match &args.output {
        Some(output) => {
            let format = if args.table { "dot" } else { args.format.as_str() };
            write_output(content, format, output)?;
            println!("output saved to: {}", output.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
