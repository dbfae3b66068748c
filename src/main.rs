use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ugit::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "ugit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressable version control tool",
    long_about = "This is a minimal version control tool, written in Rust. \
    It stores snapshots of a directory as content-addressed objects \
    and names them with branches, tags and HEAD.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Store a file as a blob object",
        long_about = "This command stores the contents of a file in the object database \
        and prints the resulting object id."
    )]
    HashObject {
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the raw payload of an object",
        long_about = "This command prints the raw payload of an object. \
        The object may be given as an object id or as a ref name."
    )]
    CatFile {
        #[arg(index = 1, help = "The object id or name to print")]
        object: String,
    },
    #[command(
        name = "write-tree",
        about = "Snapshot the working directory into a tree object"
    )]
    WriteTree,
    #[command(
        name = "read-tree",
        about = "Replace the working directory with the contents of a tree object"
    )]
    ReadTree {
        #[arg(index = 1, help = "The tree object id or name")]
        tree: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the working directory and records it \
        as a new commit on top of HEAD."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the commit history")]
    Log {
        #[arg(index = 1, help = "The commit to start from (defaults to HEAD)")]
        name: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Restore a commit into the working directory",
        long_about = "This command restores the working directory to the given commit. \
        Checking out a branch attaches HEAD to it, anything else detaches HEAD."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch, tag or commit to check out")]
        name: String,
    },
    #[command(name = "tag", about = "Create a tag")]
    Tag {
        #[arg(index = 1, help = "The tag name")]
        name: String,
        #[arg(index = 2, help = "The commit to tag (defaults to HEAD)")]
        target: Option<String>,
    },
    #[command(
        name = "branch",
        about = "List branches or create a new one",
        long_about = "Without arguments this command lists all branches. \
        With a name it creates a branch at the start point (defaults to HEAD)."
    )]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: Option<String>,
        #[arg(index = 2, help = "The commit to start the branch at")]
        start_point: Option<String>,
    },
    #[command(name = "status", about = "Show which branch or commit HEAD is on")]
    Status,
    #[command(
        name = "reset",
        about = "Move the current branch to another commit",
        long_about = "This command moves HEAD, or the branch HEAD is attached to, \
        without touching the working directory."
    )]
    Reset {
        #[arg(index = 1, help = "The commit to reset to")]
        name: String,
    },
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;

    Ok(Repository::open(&pwd, Box::new(std::io::stdout()))?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd, Box::new(std::io::stdout()))?
                }
            };

            repository.init()?
        }
        Commands::HashObject { file } => {
            let repository = open_repository()?;
            let pwd = std::env::current_dir()?;
            let oid = repository.hash_object(&pwd.join(file))?;

            writeln!(repository.writer(), "{oid}")?;
        }
        Commands::CatFile { object } => {
            let repository = open_repository()?;

            repository.cat_file(object)?;
        }
        Commands::WriteTree => {
            let repository = open_repository()?;
            let oid = repository.write_tree()?;

            writeln!(repository.writer(), "{oid}")?;
        }
        Commands::ReadTree { tree } => {
            let repository = open_repository()?;
            let oid = repository.resolve_name(tree)?;

            repository.read_tree(&oid)?;
        }
        Commands::Commit { message } => {
            let repository = open_repository()?;
            let oid = repository.commit(message)?;

            writeln!(repository.writer(), "{oid}")?;
        }
        Commands::Log { name } => {
            let repository = open_repository()?;

            repository.log(name.as_deref())?;
        }
        Commands::Checkout { name } => {
            let repository = open_repository()?;
            let oid = repository.checkout(name)?;

            match repository.refs().current_branch()? {
                Some(branch) => eprintln!("Switched to branch '{}'", branch.to_short_name()),
                None => eprintln!("HEAD is now at {}", oid.to_short_oid()),
            }
        }
        Commands::Tag { name, target } => {
            let repository = open_repository()?;

            repository.create_tag(name, target.as_deref())?;
        }
        Commands::Branch { name, start_point } => {
            let repository = open_repository()?;

            match name {
                Some(name) => {
                    let oid = repository.create_branch(name, start_point.as_deref())?;
                    eprintln!("Branch '{name}' created at {}", oid.to_short_oid());
                }
                None => repository.list_branches()?,
            }
        }
        Commands::Status => {
            let repository = open_repository()?;

            repository.status()?;
        }
        Commands::Reset { name } => {
            let repository = open_repository()?;

            repository.reset(name)?;
        }
    }

    Ok(())
}

