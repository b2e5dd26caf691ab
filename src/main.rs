use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tiny_parser::analysis::{analyze, annotate, Analysis, AnalysisError};
use tiny_parser::parser::SyntaxNode;
use tiny_parser::render::{to_dot, GraphvizRenderer, DEFAULT_DOT_PROGRAM, DEFAULT_FORMAT};
use tracing::Level;

#[derive(ClapParser)]
#[command(name = "tiny-parser")]
#[command(about = "Scanner and parser for the TINY teaching language", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize the input file and print tokens
    Lex {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Parse the input file and print the syntax tree
    Parse {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Export the syntax tree as Graphviz DOT
    Dot {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file path (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
    /// Render the syntax tree to an image with Graphviz
    Render {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output image path
        #[arg(short, long, value_name = "OUTPUT", default_value = "syntax_tree.png")]
        output: PathBuf,

        /// Image format passed to Graphviz
        #[arg(short = 'T', long, value_name = "FORMAT", default_value = DEFAULT_FORMAT)]
        format: String,

        /// Graphviz program used for layout
        #[arg(long, value_name = "PATH", env = "TINY_DOT", default_value = DEFAULT_DOT_PROGRAM)]
        dot_program: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lex { file } => lex_file(&file)?,
        Commands::Parse { file } => parse_file(&file)?,
        Commands::Dot { file, output } => dot_file(&file, output.as_deref())?,
        Commands::Render {
            file,
            output,
            format,
            dot_program,
        } => render_file(&file, &output, &format, dot_program)?,
    }

    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file '{}'", path.display()))
}

fn lex_file(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let analysis = analyze(&source);

    for token in &analysis.tokens {
        println!("{token}");
    }

    if analysis.lexical_errors.is_empty() {
        if analysis.tokens.is_empty() {
            println!("\nEnter code first!");
        } else {
            println!("\nTokens generated with no errors ({} tokens)", analysis.tokens.len());
        }
        return Ok(());
    }

    let lines: Vec<String> = analysis.error_lines().iter().map(usize::to_string).collect();
    eprint!("{}", annotate(&source, &analysis.lexical_errors));
    bail!(
        "lexical errors in '{}' on line(s) {}",
        path.display(),
        lines.join(", ")
    )
}

/// Scan and parse, turning every failure into a reportable error.
fn syntax_tree(path: &Path, source: &str) -> Result<SyntaxNode> {
    let Analysis {
        lexical_errors,
        tree,
        ..
    } = analyze(source);

    match tree {
        Ok(tree) => {
            tracing::info!(nodes = tree.node_count(), "syntax tree built");
            Ok(tree)
        }
        Err(AnalysisError::Lexical { .. }) => {
            eprint!("{}", annotate(source, &lexical_errors));
            bail!(
                "syntax tree couldn't be generated for '{}': fix the lexical errors first",
                path.display()
            )
        }
        Err(err) => {
            Err(err).with_context(|| format!("failed to parse '{}'", path.display()))
        }
    }
}

fn parse_file(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let tree = syntax_tree(path, &source)?;

    println!("Syntax tree:");
    println!("============\n");
    print!("{tree}");
    println!("\nParsing done: {} nodes", tree.node_count());

    Ok(())
}

fn dot_file(path: &Path, output: Option<&Path>) -> Result<()> {
    let source = read_source(path)?;
    let tree = syntax_tree(path, &source)?;
    let dot = to_dot(&tree);

    if let Some(output_path) = output {
        fs::write(output_path, dot)
            .with_context(|| format!("failed to write DOT to '{}'", output_path.display()))?;
        println!("DOT written to: {}", output_path.display());
    } else {
        print!("{dot}");
    }

    Ok(())
}

fn render_file(path: &Path, output: &Path, format: &str, dot_program: PathBuf) -> Result<()> {
    let source = read_source(path)?;
    let tree = syntax_tree(path, &source)?;

    let renderer = GraphvizRenderer::new(dot_program).with_format(format);
    renderer
        .render(&tree, output)
        .with_context(|| format!("failed to render syntax tree to '{}'", output.display()))?;

    println!("Syntax tree generated successfully: {}", output.display());
    Ok(())
}
