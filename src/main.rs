use anyhow::Context;
use clap::Parser;
use log::{error, info, LevelFilter};
use proptab::table_io::{write_table, TableFormat, TableStyle};
use proptab::parser::compile_with;
use proptab::{tabulate_with, Syntax, TruthTable};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "FORMULA")]
    /// Formulas to tabulate, e.g. "((p → q) ∧ (p → r)) → (q ∧ r)"
    formulas: Vec<String>,

    #[clap(short, long, value_parser, value_name = "FILE")]
    /// Read additional formulas from a file, one per line ('#' starts a comment)
    input: Option<PathBuf>,

    #[clap(short, long, value_parser, value_name = "DIR")]
    /// Write every table to DIR/table_NN.{txt,csv} instead of stdout
    output: Option<PathBuf>,

    #[clap(long)]
    /// Output comma separated values
    csv: bool,

    #[clap(long, num_args = 2, value_names = ["TRUE", "FALSE"])]
    /// Labels for true and false cells (default: V F)
    labels: Option<Vec<String>>,

    #[clap(long, value_parser, value_name = "N", default_value_t = 12)]
    /// Reject formulas with more than N distinct variables
    max_vars: usize,

    #[clap(short, long, action = clap::ArgAction::Count)]
    /// Increase logging verbosity (-v, -vv, -vvv)
    verbose: u8,
}

impl Args {
    fn style(&self) -> TableStyle {
        let mut style = TableStyle {
            format: if self.csv {
                TableFormat::Csv
            } else {
                TableFormat::Text
            },
            ..TableStyle::default()
        };

        if let Some([t, f]) = self.labels.as_deref() {
            style.true_label = t.clone();
            style.false_label = f.clone();
        }

        style
    }

    const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse_from(argfile::expand_args_from(
        wild::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )?);

    simplelog::TermLogger::init(
        args.log_level(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let mut formulas = args.formulas.clone();

    if let Some(input) = &args.input {
        let file = File::open(input)
            .with_context(|| format!("cannot open input file {}", input.display()))?;
        formulas.extend(read_formulas(BufReader::new(file))?);
    }

    if formulas.is_empty() {
        Err(anyhow::anyhow!(
            "Must provide at least one formula, either as an argument or with --input"
        ))?
    }

    info!("tabulating {} formula(s)", formulas.len());

    // formulas share nothing, so they are tabulated in parallel; results keep input order
    let tables: Vec<anyhow::Result<TruthTable>> = formulas
        .par_iter()
        .map(|formula| tabulate(formula, args.max_vars))
        .collect();

    let style = args.style();
    let mut failures = 0;

    if let Some(dir) = &args.output {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create output directory {}", dir.display()))?;
    }

    let mut stdout = BufWriter::new(io::stdout());

    for (index, (formula, table)) in formulas.iter().zip(tables).enumerate() {
        let table = match table {
            Ok(table) => table,
            Err(e) => {
                error!("{e:#}");
                failures += 1;
                continue;
            }
        };

        if let Some(dir) = &args.output {
            let path = output_path(dir, index + 1, style.format);
            let mut writer = BufWriter::new(
                File::create(&path)
                    .with_context(|| format!("cannot create {}", path.display()))?,
            );
            write_table(&mut writer, &table, &style)?;
            writer.flush()?;
            info!("wrote {}", path.display());
        } else {
            if index > 0 {
                writeln!(stdout)?;
            }
            if style.format == TableFormat::Text {
                writeln!(stdout, "{formula}")?;
                writeln!(stdout)?;
            }
            write_table(&mut stdout, &table, &style)?;
        }
    }

    // flush the writer before dropping it
    stdout.flush()?;

    if failures > 0 {
        Err(anyhow::anyhow!(
            "{failures} of {} formula(s) could not be tabulated",
            formulas.len()
        ))?
    }

    Ok(())
}

fn tabulate(formula: &str, max_vars: usize) -> anyhow::Result<TruthTable> {
    let syntax = Syntax::standard();
    let program =
        compile_with(syntax, formula).with_context(|| format!("in formula {formula:?}"))?;
    let variable_count = program.variables().len();

    if variable_count > max_vars {
        Err(anyhow::anyhow!(
            "formula {formula:?} has {variable_count} variables, more than the limit of {max_vars}"
        ))?
    }

    let table =
        tabulate_with(syntax, &program).with_context(|| format!("in formula {formula:?}"))?;
    info!(
        "{formula:?}: {} columns, {} rows",
        table.headers().len(),
        table.rows().len()
    );

    Ok(table)
}

fn read_formulas<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut formulas = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let formula = line.split('#').next().unwrap_or_default().trim();

        if !formula.is_empty() {
            formulas.push(formula.to_string());
        }
    }

    Ok(formulas)
}

fn output_path(dir: &Path, index: usize, format: TableFormat) -> PathBuf {
    dir.join(format!("table_{index:02}.{}", format.extension()))
}
