use clap::{Parser, Subcommand};

use self::{
    generate::GenerateArg, generate_corpus::GenerateCorpusArg, run_policy::RunPolicyArg,
    solve::SolveArg, train::TrainArg,
};

mod generate;
mod generate_corpus;
mod run_policy;
mod solve;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Generate a random perfect maze
    Generate(#[clap(flatten)] GenerateArg),
    /// Find a shortest path through a maze file with A*
    Solve(#[clap(flatten)] SolveArg),
    /// Generate a directory of mazes for training
    GenerateCorpus(#[clap(flatten)] GenerateCorpusArg),
    /// Train a navigation policy using genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Walk a trained policy through a maze file
    RunPolicy(#[clap(flatten)] RunPolicyArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Solve(arg) => solve::run(&arg)?,
        Mode::GenerateCorpus(arg) => generate_corpus::run(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
        Mode::RunPolicy(arg) => run_policy::run(&arg)?,
    }
    Ok(())
}
