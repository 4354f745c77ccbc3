#![allow(clippy::uninlined_format_args)]

use refa::pipeline;
use refa::{Error, Regex};
use std::{fs, path::PathBuf};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "refa-tool")]
struct Opt {
    /// The regular expression.
    pattern: String,

    /// Dump the preprocessed pattern to stdout.
    #[structopt(long)]
    dump_preprocessed: bool,

    /// Dump the parse tree to stdout.
    #[structopt(long)]
    dump_tree: bool,

    /// Dump the NFA to stdout.
    #[structopt(long)]
    dump_nfa: bool,

    /// Dump the DFA to stdout.
    #[structopt(long)]
    dump_dfa: bool,

    /// Dump all regular expression compilation phases to stdout.
    #[structopt(long)]
    dump_phases: bool,

    /// Search for a matching substring instead of matching whole inputs.
    #[structopt(long)]
    search: bool,

    /// The input values to match against.
    #[structopt(conflicts_with = "file")]
    inputs: Vec<String>,

    /// Match against the contents of a specified file.
    #[structopt(long, conflicts_with = "inputs")]
    file: Option<PathBuf>,
}

fn exec_re_on_string(re: &Regex, input: &str, search: bool) {
    if search {
        match re.find(input) {
            Some(range) => println!(
                "Match: \"{}\" ({}..{})",
                &input[range.clone()],
                range.start,
                range.end
            ),
            None => println!("No match"),
        }
    } else {
        println!("Result: {}", re.test(input));
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Opt::from_args();

    if args.dump_phases || args.dump_preprocessed {
        println!("Preprocessed: {}", pipeline::preprocess(&args.pattern));
    }

    let tree = pipeline::try_parse(&args.pattern)?;
    if args.dump_phases || args.dump_tree {
        println!("Parse tree:\n{}", tree);
    }

    let nfa = pipeline::build_nfa(&tree);
    if args.dump_phases || args.dump_nfa {
        println!("{}", nfa);
    }

    let dfa = pipeline::determinize(&nfa);
    if args.dump_phases || args.dump_dfa {
        println!("{}", dfa);
    }

    let re = Regex::new(&args.pattern)?;
    if let Some(ref path) = args.file {
        match fs::read_to_string(path) {
            Ok(contents) => exec_re_on_string(&re, contents.trim_end(), args.search),
            Err(err) => println!("{}: {}", err, path.display()),
        };
    } else {
        for input in args.inputs {
            exec_re_on_string(&re, &input, args.search);
        }
    }
    Ok(())
}
