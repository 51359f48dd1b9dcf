//! Graphviz sitemap
//!
//! The crawl state becomes a directed graph: pages and assets are nodes,
//! links are bold edges and asset references are dashed edges. After the
//! `.dot` file is written the configured Graphviz command is run to produce
//! a PDF next to it.

use crate::output::traits::{OutputError, OutputResult, SitemapRenderer};
use crate::state::CrawlState;
use crate::url::host_label;
use petgraph::dot::{Config as DotConfig, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use url::Url;

/// Kind of reference an edge stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Link,
    Asset,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Link => write!(f, "link"),
            EdgeKind::Asset => write!(f, "asset"),
        }
    }
}

/// Node category, decided by the URL's file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Page,
    Image,
    Script,
    Stylesheet,
    Other,
}

impl ResourceKind {
    pub fn of(url: &Url) -> Self {
        let last_segment = url.path().rsplit('/').next().unwrap_or("");
        let extension = match last_segment.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => String::new(),
        };

        match extension.as_str() {
            "" | "html" | "htm" | "php" => ResourceKind::Page,
            "gif" | "png" | "jpg" | "jpeg" => ResourceKind::Image,
            "js" => ResourceKind::Script,
            "css" => ResourceKind::Stylesheet,
            _ => ResourceKind::Other,
        }
    }

    pub fn fill_color(self) -> &'static str {
        match self {
            ResourceKind::Page => "#DDDDDD",
            ResourceKind::Image => "#FFC6BC",
            ResourceKind::Script => "#A7D3D2",
            ResourceKind::Stylesheet => "#F7A541",
            ResourceKind::Other => "#A9DA88",
        }
    }
}

/// Writes `<root-host>.dot` and renders it with Graphviz
#[derive(Debug, Clone)]
pub struct GraphvizSitemap {
    output_dir: PathBuf,
    dot_command: String,
}

impl GraphvizSitemap {
    pub fn new(output_dir: impl Into<PathBuf>, dot_command: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            dot_command: dot_command.into(),
        }
    }

    /// Runs `<dot> -Tpdf <file> -O`, returning the PDF path on success
    ///
    /// A missing or failing Graphviz install is not an error; the `.dot`
    /// file is still useful on its own.
    fn render_pdf(&self, dot_path: &Path) -> Option<PathBuf> {
        let status = Command::new(&self.dot_command)
            .arg("-Tpdf")
            .arg(dot_path)
            .arg("-O")
            .status();

        match status {
            Ok(status) if status.success() => {
                let mut pdf = dot_path.as_os_str().to_owned();
                pdf.push(".pdf");
                Some(PathBuf::from(pdf))
            }
            Ok(status) => {
                tracing::warn!("{} exited with {} for {}", self.dot_command, status, dot_path.display());
                None
            }
            Err(e) => {
                tracing::warn!("Could not run {}: {}", self.dot_command, e);
                None
            }
        }
    }
}

impl SitemapRenderer for GraphvizSitemap {
    fn name(&self) -> &'static str {
        "graphviz"
    }

    fn render(&self, crawled: &CrawlState) -> OutputResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;

        let dot_path = self
            .output_dir
            .join(format!("{}.dot", host_label(crawled.root())));
        fs::write(&dot_path, build_dot(crawled)).map_err(|source| OutputError::Write {
            path: dot_path.clone(),
            source,
        })?;

        let mut written = vec![dot_path.clone()];
        written.extend(self.render_pdf(&dot_path));
        Ok(written)
    }
}

/// Builds the sitemap graph with one node per distinct URL
///
/// Crawled URLs are added first in URL order, then referenced URLs that were
/// never crawled (images, scripts) as they are first seen.
pub fn build_graph(crawled: &CrawlState) -> DiGraph<Url, EdgeKind> {
    let mut graph = DiGraph::new();
    let mut nodes: BTreeMap<Url, NodeIndex> = BTreeMap::new();

    for url in crawled.urls() {
        nodes.insert(url.clone(), graph.add_node(url.clone()));
    }

    for resource in crawled.resources() {
        let from = nodes[&resource.url];

        let references = resource
            .links
            .iter()
            .map(|url| (url, EdgeKind::Link))
            .chain(resource.assets.iter().map(|url| (url, EdgeKind::Asset)));

        for (target, kind) in references {
            let to = *nodes
                .entry(target.clone())
                .or_insert_with(|| graph.add_node(target.clone()));

            if graph.find_edge(from, to).is_none() {
                graph.add_edge(from, to, kind);
            }
        }
    }

    graph
}

/// Renders the sitemap graph in DOT format
pub fn build_dot(crawled: &CrawlState) -> String {
    let graph = build_graph(crawled);

    let dot = Dot::with_attr_getters(
        &graph,
        &[DotConfig::EdgeNoLabel, DotConfig::NodeNoLabel],
        &|_, edge| match edge.weight() {
            EdgeKind::Link => "style=bold".to_string(),
            EdgeKind::Asset => "style=dashed".to_string(),
        },
        &|_, (_, url)| node_attributes(url),
    );

    format!("{}", dot)
}

fn node_attributes(url: &Url) -> String {
    let kind = ResourceKind::of(url);
    let mut attrs = format!(
        "label=\"{}\" style=filled fillcolor=\"{}\"",
        escape_label(url.as_str()),
        kind.fill_color()
    );
    if kind == ResourceKind::Page {
        attrs.push_str(" shape=box fontsize=20");
    }
    attrs
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
