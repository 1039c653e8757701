use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Parse CREATE TABLE statements and print the table model as JSON
    Parse {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check the input for syntax errors without building the model
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print the raw token stream as JSON
    Tokens {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
pub struct InputArgs {
    #[arg(
        short,
        long,
        default_value = "sqlite",
        help = "SQL dialect: sqlite, postgres or mysql"
    )]
    pub dialect: String,

    #[arg(help = "DDL file to read; stdin is used when omitted")]
    pub path: Option<String>,
}

#[derive(Args)]
pub struct OutputArgs {
    #[arg(long, help = "Print single-line JSON instead of pretty-printed JSON")]
    pub compact: bool,

    #[arg(
        short,
        long,
        help = "If specified, writes the JSON to this file instead of stdout"
    )]
    pub output: Option<String>,
}
