use std::path::PathBuf;
use std::process::exit;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use dotenvy::dotenv;

use gems_backend::AppGlobals;
use gems_backend::asset_source::DirAssetSource;
use gems_backend::helpers::format_category_name;
use gems_backend::logger::{set_log_level, Level};
use gems_backend::store::{VocabularyStore, DEFAULT_RANDOM_COUNT};
use gems_backend::types::{BundleTier, CurriculumLevel, ExamTier, SupportedLanguage, VocabularyFilters, VocabularyWord};

fn print_words(words: &[VocabularyWord]) {
    for w in words.iter() {
        println!("{}: {} = {}", w.id, w.word, w.translation);
    }
}

fn list_categories(
    store: &VocabularyStore,
    language: SupportedLanguage,
    level: Option<CurriculumLevel>,
    pretty: bool,
) -> Result<()> {
    for c in store.get_available_categories(language, level) {
        if pretty {
            println!("{}", format_category_name(&c));
        } else {
            println!("{}", c);
        }
    }
    Ok(())
}

fn filter_words(
    store: &VocabularyStore,
    filters: &VocabularyFilters,
    print_titles: bool,
    print_count: bool,
) -> Result<()> {
    let words = store.get_filtered_vocabulary(filters);

    if print_titles {
        print_words(&words);
    }
    if print_count {
        println!("{}", words.len());
    }

    Ok(())
}

fn bundle_summary(store: &VocabularyStore, language: SupportedLanguage, tier: BundleTier) -> Result<()> {
    let bundle = store
        .load_bundled_vocabulary(language, tier)
        .ok_or_else(|| anyhow!("No {} bundle for {} in {}", tier, language, store.source_description()))?;

    println!("{} ({}), last updated {}", bundle.language, bundle.tier, bundle.last_updated);
    for c in bundle.categories.iter() {
        println!("{}: {}", c.id, c.name);
        for s in c.subcategories.iter() {
            println!("  {}: {} ({} words)", s.id, s.name, s.words.len());
        }
    }
    println!("{} words", bundle.word_count());

    Ok(())
}

fn local_bundles(data_dir: Option<PathBuf>) -> Result<()> {
    let dir = data_dir.ok_or_else(|| anyhow!("Use the --data-dir option or set the GEMS_DATA_DIR environment variable."))?;

    if !dir.is_dir() {
        return Err(anyhow!("Directory does not exist or is not a directory: {:?}", dir));
    }

    for b in DirAssetSource::new(&dir).list_bundles() {
        println!("{} {}: {}", b.language, b.tier, b.path.display());
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Language Gems vocabulary CLI", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the static vocabulary asset host.
    #[arg(long, global = true, value_name = "URL", env = "GEMS_ASSETS_URL")]
    assets_url: Option<String>,

    /// Local directory containing data/vocabulary/. Takes precedence over --assets-url.
    #[arg(long, global = true, value_name = "DIRECTORY_PATH", env = "GEMS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: silent, error, warn, info or debug. Overrides LOG_LEVEL.
    #[arg(long, global = true, value_name = "LEVEL", value_parser = Level::from_str)]
    log_level: Option<Level>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the supported languages
    Languages,

    /// List the categories available for a language
    #[command(arg_required_else_help = true)]
    Categories {
        #[arg(value_parser = SupportedLanguage::from_str)]
        language: SupportedLanguage,

        /// Curriculum level, KS3 or KS4
        #[arg(long, value_parser = CurriculumLevel::from_str)]
        level: Option<CurriculumLevel>,

        /// Print display names instead of ids
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },

    /// List the subcategories of a category
    #[command(arg_required_else_help = true)]
    Subcategories {
        #[arg(value_parser = SupportedLanguage::from_str)]
        language: SupportedLanguage,

        category: String,
    },

    /// Query the complete bundle with curriculum filters
    #[command(arg_required_else_help = true)]
    Filter {
        #[arg(value_parser = SupportedLanguage::from_str)]
        language: SupportedLanguage,

        #[arg(long, value_parser = CurriculumLevel::from_str)]
        level: Option<CurriculumLevel>,

        /// GCSE tier, foundation or higher
        #[arg(long, value_parser = ExamTier::from_str)]
        tier: Option<ExamTier>,

        /// Exam board code, e.g. AQA, EDEXCEL, WJEC
        #[arg(long)]
        board: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        subcategory: Option<String>,

        /// Print the matching words
        #[arg(long, default_value_t = false)]
        print_words: bool,

        /// Print the count of the matching words, --print-count false to turn it off
        #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
        print_count: bool,
    },

    /// Draw random words from a per-language bundle
    #[command(arg_required_else_help = true)]
    Random {
        #[arg(value_parser = SupportedLanguage::from_str)]
        language: SupportedLanguage,

        #[arg(long, default_value_t = DEFAULT_RANDOM_COUNT)]
        count: usize,

        #[arg(long, default_value = "all", value_parser = BundleTier::from_str)]
        tier: BundleTier,
    },

    /// Show the categories and word counts of a per-language bundle
    #[command(arg_required_else_help = true)]
    Bundle {
        #[arg(value_parser = SupportedLanguage::from_str)]
        language: SupportedLanguage,

        #[arg(long, default_value = "all", value_parser = BundleTier::from_str)]
        tier: BundleTier,
    },

    /// List the per-language bundles found under --data-dir
    LocalBundles,
}

fn main() {
    // The .env may define GEMS_ASSETS_URL or GEMS_DATA_DIR, clap picks them up via `env`.
    if dotenv().is_err() {
        eprintln!("Info: No .env file found or failed to load.");
    }

    let cli = Cli::parse();

    if let Some(level) = cli.log_level {
        set_log_level(level);
    }

    // Command line options win over the environment
    let mut globals = AppGlobals::new();
    globals.assets_url = cli.assets_url.clone();
    globals.data_dir = cli.data_dir.clone();

    if let Some(dir) = &globals.data_dir {
        if !dir.is_dir() {
            eprintln!("Error: Directory does not exist or is not a directory: {:?}", dir);
            exit(1);
        }
    }

    let store = VocabularyStore::new(globals.asset_source());

    let command_result = match cli.command {
        Commands::Languages => {
            for lang in store.get_available_languages() {
                println!("{} ({})", lang, lang.code());
            }
            Ok(())
        }

        Commands::Categories { language, level, pretty } => {
            list_categories(&store, language, level, pretty)
        }

        Commands::Subcategories { language, category } => {
            for s in store.get_available_subcategories(language, &category) {
                println!("{}", s);
            }
            Ok(())
        }

        Commands::Filter { language, level, tier, board, category, subcategory, print_words, print_count } => {
            let filters = VocabularyFilters {
                language,
                curriculum_level: level,
                tier,
                exam_board: board,
                category,
                subcategory,
            };
            filter_words(&store, &filters, print_words, print_count)
        }

        Commands::Random { language, count, tier } => {
            print_words(&store.get_random_vocabulary(language, count, tier));
            Ok(())
        }

        Commands::Bundle { language, tier } => {
            bundle_summary(&store, language, tier)
        }

        Commands::LocalBundles => {
            local_bundles(cli.data_dir)
        }
    };

    if let Err(e) = command_result {
        eprintln!("Error executing command: {}", e);
        exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_option() {
        let cli = Cli::try_parse_from(["gems", "languages", "--log-level", "DEBUG"]).unwrap();
        assert_eq!(cli.log_level, Some(Level::Debug));

        let cli = Cli::try_parse_from(["gems", "languages"]).unwrap();
        assert_eq!(cli.log_level, None);

        assert!(Cli::try_parse_from(["gems", "--log-level", "verbose", "languages"]).is_err());
    }

    #[test]
    fn test_filter_print_count() {
        let cli = Cli::try_parse_from(["gems", "filter", "spanish"]).unwrap();
        match cli.command {
            Commands::Filter { print_count, print_words, .. } => {
                assert!(print_count);
                assert!(!print_words);
            }
            _ => panic!("expected filter"),
        }

        let cli = Cli::try_parse_from(["gems", "filter", "spanish", "--print-words", "--print-count", "false"]).unwrap();
        match cli.command {
            Commands::Filter { print_count, print_words, .. } => {
                assert!(!print_count);
                assert!(print_words);
            }
            _ => panic!("expected filter"),
        }
    }
}
