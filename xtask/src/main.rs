use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use fitlog_stack::assets::asset_object_key;
use fitlog_stack::{build_fitlog_stack, Architecture, CodeLocation, StackConfig};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "fitlog_lambda";
const LAMBDA_BINARY: &str = "workout_lambda";
const DIST_DIR: &str = "dist";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the FitLog workspace",
    long_about = "Packages the workout Lambda, renders the CloudFormation template\n\
                  and runs CI checks for the FitLog workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the workout Lambda and zip it as `bootstrap`
    Package {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
    },
    /// Render the CloudFormation template for the whole stack
    Synth {
        /// Apex domain; the frontend bucket is created with this exact name
        #[arg(long, env = "FITLOG_DOMAIN_NAME")]
        domain_name: String,
        /// Email address subscribed to workout notifications
        #[arg(long, env = "FITLOG_NOTIFICATION_EMAIL")]
        notification_email: Option<String>,
        /// Bucket holding the packaged Lambda zip
        #[arg(long, env = "FITLOG_CODE_BUCKET")]
        code_bucket: String,
        /// Object key of the packaged Lambda zip (printed by `package`)
        #[arg(long, env = "FITLOG_CODE_KEY")]
        code_key: String,
        /// Deployment region
        #[arg(long, env = "FITLOG_REGION", default_value = "us-east-1")]
        region: String,
        /// Target triple the Lambda was built for
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Output file path
        #[arg(long, default_value = "dist/fitlog-stack.template.json")]
        output: PathBuf,
    },
    /// Run CI checks (fmt, clippy, tests)
    Ci,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn package_workout_lambda(target: &str, profile: BuildProfile) {
    ensure_rust_target_installed(target);

    step("Build workout lambda binary");
    let mut cargo_args = vec![
        "build",
        "-p",
        LAMBDA_PACKAGE,
        "--target",
        target,
        "--bin",
        LAMBDA_BINARY,
    ];
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);

    step("Package lambda zip artifact");
    let binary_path = Path::new("target")
        .join(target)
        .join(profile.dir_name())
        .join(LAMBDA_BINARY);
    let dist_dir = Path::new(DIST_DIR);
    fs::create_dir_all(dist_dir).expect("failed to create dist directory");

    let zip_path = dist_dir.join(format!("{LAMBDA_BINARY}.zip"));
    package_lambda_zip(&binary_path, &zip_path);

    let zip_bytes = fs::read(&zip_path).expect("failed to read packaged zip");
    eprintln!(
        "\nPackaged artifact:\n- {}\nUpload it to your code bucket under:\n- {}",
        zip_path.display(),
        asset_object_key(&zip_bytes)
    );
}

fn ensure_rust_target_installed(target: &str) {
    let output = match Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    {
        Ok(value) => value,
        Err(error) => {
            eprintln!(
                "warning: failed to run `rustup target list --installed` ({error}); continuing without target preflight"
            );
            return;
        }
    };

    let installed = String::from_utf8_lossy(&output.stdout);
    if output.status.success() && !installed.lines().any(|line| line.trim() == target) {
        panic!(
            "rust target `{target}` is not installed. run `rustup target add {target}` and retry `cargo run -p xtask -- package`"
        );
    }
}

fn package_lambda_zip(binary_path: &Path, zip_path: &Path) {
    if !binary_path.exists() {
        panic!("expected lambda binary at '{}'", binary_path.display());
    }

    let binary = fs::read(binary_path).expect("failed to read lambda binary");
    let file = fs::File::create(zip_path).expect("failed to create lambda zip");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .expect("failed to start bootstrap entry in lambda zip");
    zip.write_all(&binary)
        .expect("failed to write bootstrap entry");
    zip.finish().expect("failed to finish lambda zip");
}

fn synth(config: StackConfig, output: &Path) {
    step("Render CloudFormation template");
    let template = match build_fitlog_stack(&config) {
        Ok(value) => value,
        Err(error) => {
            eprintln!("error: {error}");
            exit(2);
        }
    };
    let rendered = template
        .to_json_pretty()
        .expect("template should serialize");

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).expect("failed to create template directory");
    }
    fs::write(output, rendered).expect("failed to write template");
    eprintln!(
        "\nWrote {} ({} resources)",
        output.display(),
        template.resources.len()
    );
}

fn ci() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test workspace");
    run_cargo(&["test", "--workspace"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Package { target, profile } => {
            package_workout_lambda(&target, profile);
        }
        Commands::Synth {
            domain_name,
            notification_email,
            code_bucket,
            code_key,
            region,
            target,
            output,
        } => {
            let mut config = StackConfig::new(
                domain_name,
                CodeLocation {
                    bucket: code_bucket,
                    key: code_key,
                },
            )
            .with_region(region)
            .with_architecture(Architecture::from_target(&target));
            if let Some(email) = notification_email.filter(|value| !value.trim().is_empty()) {
                config = config.with_notification_email(email);
            }
            synth(config, &output);
        }
        Commands::Ci => {
            ci();
            eprintln!("\nCI job passed.");
        }
    }
}
