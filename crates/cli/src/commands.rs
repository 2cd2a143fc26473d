use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Render a MERGE statement described by a JSON file
    Render {
        #[arg(long, help = "Statement file path")]
        config: String,

        #[arg(
            long,
            help = "Render literals as placeholders and print the bound parameters"
        )]
        params: bool,

        #[arg(
            long,
            help = "If specified, writes the SQL to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Check that the statement file describes a complete MERGE statement
    Validate {
        #[arg(long, help = "Statement file path")]
        config: String,
    },
    /// Print the validated statement AST as JSON
    Ast {
        #[arg(long, help = "Statement file path")]
        config: String,
    },
}
