use dossier::cracker::CrackOutput;
use dossier::{Options, RunMetrics, StageMetrics};
use std::path::Path;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(output: &Path, written: usize, metrics: &RunMetrics, options: &Options, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Wordlist: {}", output.display()), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Stages ━━━", ansi::GRAY));
    print_stage("keywords", &metrics.keywords, None, &palette);
    print_stage("variations", &metrics.variations, Some(options.limits.variation_cap), &palette);
    print_stage("combinations", &metrics.combinations, Some(options.limits.combination_cap), &palette);

    println!("\n{}", palette.paint("━━━ Output ━━━", ansi::GRAY));
    if written == 0 {
        println!("{}", palette.dim("  No words produced"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • The profile has no recognized fields");
        println!("  • Every candidate fell outside --min-length/--max-length");
        println!("\n{}", palette.dim("  Tip: Set DOSSIER_LOG=dossier=debug to see per-stage details"));
    } else {
        println!(
            "  {} {}  {} {}  {} {}",
            palette.dim("generated:"),
            palette.paint(metrics.generated.to_string(), ansi::GREEN),
            palette.dim("reference:"),
            palette.paint(metrics.reference.to_string(), ansi::BLUE),
            palette.dim("dropped by length:"),
            palette.paint(metrics.filtered_by_length.to_string(), ansi::YELLOW),
        );
        let budget = if written >= options.max_words { " (budget reached)" } else { "" };
        println!(
            "  {} {}{}",
            palette.dim("written:"),
            palette.bold(palette.paint(written.to_string(), ansi::GREEN)),
            palette.dim(budget)
        );
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Variations: {}  │  Combinations: {}",
        palette.paint(format!("{:?}", metrics.total), ansi::GREEN),
        palette.paint(format!("{:?}", metrics.variations.duration), ansi::CYAN),
        palette.dim(format!("{:?}", metrics.combinations.duration)),
    );
    println!();
}

pub fn print_crack(output: &CrackOutput, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.paint("━━━ John ━━━", ansi::GRAY));
    println!("  {} {}", palette.dim("command:"), palette.paint(&output.command, ansi::BLUE));

    let status = if output.status.success() {
        palette.paint("✓ finished", ansi::GREEN)
    } else {
        palette.paint(format!("✗ {}", output.status), ansi::RED)
    };
    println!("  {status}");

    for line in output.stdout.lines() {
        println!("    {line}");
    }
    for line in output.stderr.lines() {
        println!("    {}", palette.dim(line));
    }
    println!();
}

fn print_stage(name: &str, stage: &StageMetrics, cap: Option<usize>, palette: &ansi::Palette) {
    let capped = cap.is_some_and(|cap| stage.produced >= cap);
    println!(
        "  {} {} {}",
        palette.paint(format!("{name:<13}"), ansi::BLUE),
        if stage.produced > 0 {
            palette.paint(format!("✓ {}", stage.produced), ansi::GREEN)
        } else {
            palette.dim(format!("✗ {}", stage.produced))
        },
        if capped { palette.paint("(cap reached)", ansi::YELLOW) } else { palette.dim(format!("{:?}", stage.duration)) }
    );
}
