//! Command-line interface for the Clickoz text tools.
//!
//! Every subcommand takes its input as an argument or, when omitted, from
//! stdin.  [`run`] turns a parsed command into the text the binary prints;
//! [`run_with_stdin`] does the same with an explicit reader for stdin.

use crate::catalog::{self, ChipFilter, RECOMMENDED_COUNT};
use crate::error::ClickozError;
use crate::tools::base64_codec::{self, EncodeOptions};
use crate::tools::entities::{self, EntityPreset};
use crate::tools::json_formatter::{self, JsonStats, JsonStyle};
use crate::tools::url_codec::{self, UrlMode};
use crate::tools::utm::{self, UtmParams, UtmPreset};
use crate::tools::word_counter::TextStats;
use crate::tools::youtube_tags::{self, Language, TagRequest, VideoCategory, DEFAULT_MAX_TAGS};
use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "clickoz-tools")]
#[command(about = "Clickoz text tools: counters, formatters and link builders", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Word, sentence and paragraph counts with reading time
    Words(TextInput),

    /// Prettify, minify or validate JSON
    Json {
        #[command(flatten)]
        input: TextInput,

        /// Print on one line instead of indenting
        #[arg(short, long)]
        minify: bool,

        /// Print line/char/byte counts after the document
        #[arg(long)]
        stats: bool,
    },

    /// Base64 and Base64URL
    Base64 {
        #[command(subcommand)]
        command: Base64Commands,
    },

    /// HTML entity encoding and decoding
    Entities {
        #[command(subcommand)]
        command: EntityCommands,
    },

    /// Percent-encode or decode text, or clean up a query string
    Url {
        /// encode, decode or query
        mode: UrlMode,

        #[command(flatten)]
        input: TextInput,

        /// Treat '+' as a space (form encoding)
        #[arg(short, long)]
        plus_as_space: bool,

        /// Print length, unsafe-character and pair counts after the output
        #[arg(long)]
        stats: bool,
    },

    /// Score a video title and suggest tags
    Tags(TagArgs),

    /// Add utm_* campaign parameters to a link
    Utm(UtmArgs),

    /// List, search or sample the tool directory
    Catalog {
        /// Case-insensitive search term
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category chip or hash (seo, text, dev, creator, #seo, all)
        #[arg(short, long, default_value = "all")]
        chip: ChipFilter,

        /// Pick random recommended tools instead of listing
        #[arg(long)]
        recommend: bool,

        /// Print cards as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct TextInput {
    /// Input text (reads stdin when omitted)
    pub text: Option<String>,
}

impl TextInput {
    fn read(self, stdin: &mut dyn Read) -> io::Result<String> {
        match self.text {
            Some(text) => Ok(text),
            None => {
                let mut buf = String::new();
                stdin.read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

#[derive(Subcommand)]
pub enum Base64Commands {
    /// Encode text, or raw bytes when the input is a hex dump
    Encode {
        #[command(flatten)]
        input: TextInput,

        /// Drop trailing '=' padding
        #[arg(long)]
        no_pad: bool,

        /// Use the URL-safe alphabet (never padded)
        #[arg(short, long)]
        url_safe: bool,
    },
    /// Decode standard or URL-safe Base64
    Decode(TextInput),
    /// Show the header and payload of a JWT
    Jwt(TextInput),
}

#[derive(Subcommand)]
pub enum EntityCommands {
    /// Escape text for HTML
    Encode {
        #[command(flatten)]
        input: TextInput,

        /// html-safe, text-only, attributes, unicode or layout
        #[arg(short, long, default_value = "html-safe")]
        preset: EntityPreset,
    },
    /// Turn entities back into characters
    Decode(TextInput),
}

#[derive(Args)]
pub struct TagArgs {
    #[command(flatten)]
    pub title: TextInput,

    /// Keyword to build around instead of the one inferred from the title
    #[arg(short, long, default_value = "")]
    pub focus: String,

    /// en or it
    #[arg(short, long, default_value = "en")]
    pub lang: Language,

    /// general, howto, tech, gaming, music, education, vlog, finance or fitness
    #[arg(short, long, default_value = "general")]
    pub category: VideoCategory,

    /// Number of tags to return (5-60)
    #[arg(short, long, default_value_t = DEFAULT_MAX_TAGS)]
    pub max: usize,
}

#[derive(Args)]
pub struct UtmArgs {
    /// Landing page; https:// is added when no scheme is given
    pub url: String,

    /// youtube, instagram, tiktok, newsletter or ads (fills blanks only)
    #[arg(short, long)]
    pub preset: Option<UtmPreset>,

    #[arg(long, default_value = "")]
    pub source: String,
    #[arg(long, default_value = "")]
    pub medium: String,
    #[arg(long, default_value = "")]
    pub campaign: String,
    #[arg(long, default_value = "")]
    pub term: String,
    #[arg(long, default_value = "")]
    pub content: String,
}

/// Run `command`, reading omitted input from the process stdin.
pub fn run(command: Commands) -> Result<String, Box<dyn Error>> {
    run_with_stdin(command, &mut io::stdin().lock())
}

/// Run `command`, reading omitted input from `stdin`.  Side notes (entity
/// counts, mode hints) go to stderr; the returned text is the result proper.
pub fn run_with_stdin(command: Commands, stdin: &mut dyn Read) -> Result<String, Box<dyn Error>> {
    let output = match command {
        Commands::Words(input) => TextStats::from_text(&input.read(stdin)?).report(),

        Commands::Json {
            input,
            minify,
            stats,
        } => {
            let style = if minify {
                JsonStyle::Minified
            } else {
                JsonStyle::Pretty
            };
            let formatted = json_formatter::format_json(&input.read(stdin)?, style)?;
            if stats {
                let s = JsonStats::of(&formatted);
                format!(
                    "{formatted}\n\nLines: {} | Chars: {} | Bytes: {}",
                    s.lines, s.chars, s.bytes
                )
            } else {
                formatted
            }
        }

        Commands::Base64 { command } => match command {
            Base64Commands::Encode {
                input,
                no_pad,
                url_safe,
            } => {
                let options = EncodeOptions {
                    pad: !no_pad,
                    url_safe,
                };
                base64_codec::encode(&input.read(stdin)?, options)?.output
            }
            Base64Commands::Decode(input) => base64_codec::decode(&input.read(stdin)?)?.text,
            Base64Commands::Jwt(input) => {
                let token = input.read(stdin)?;
                let parts = base64_codec::inspect_jwt(&token)
                    .ok_or("expected a token with three dot-separated parts")?;
                let verdict = if parts.looks_valid() { "Yes" } else { "Maybe" };
                format!(
                    "JWT: {verdict}\n\nHeader:\n{}\n\nPayload:\n{}\n\nSignature: {}",
                    parts.header.as_deref().unwrap_or("(not decodable)"),
                    parts.payload.as_deref().unwrap_or("(not decodable)"),
                    parts.signature
                )
            }
        },

        Commands::Entities { command } => {
            let out = match command {
                EntityCommands::Encode { input, preset } => {
                    entities::encode_entities(&input.read(stdin)?, preset.options())
                }
                EntityCommands::Decode(input) => entities::decode_entities(&input.read(stdin)?),
            };
            eprintln!("entities: {}", out.entity_count);
            out.text
        }

        Commands::Url {
            mode,
            input,
            plus_as_space,
            stats,
        } => {
            let text = input.read(stdin)?;
            if let Some(hint) = mode.hint(&text) {
                eprintln!("hint: {hint}");
            }
            let converted = url_codec::transform(&text, mode, plus_as_space)?;
            if stats {
                format!(
                    "{converted}\n\nInput: {} | Output: {} | Unsafe chars: {} | Query pairs: {}",
                    text.chars().count(),
                    converted.chars().count(),
                    url_codec::count_unsafe_chars(&text),
                    url_codec::count_query_pairs(&text)
                )
            } else {
                converted
            }
        }

        Commands::Tags(args) => {
            let title = args.title.read(stdin)?;
            let title = title.trim();
            if title.is_empty() {
                return Err(ClickozError::EmptyInput {
                    tool: "youtube-tags",
                }
                .into());
            }
            let request = TagRequest {
                focus: &args.focus,
                language: args.lang,
                category: Some(args.category),
                max_tags: args.max,
                ..TagRequest::new(title)
            };
            let set = youtube_tags::build_tags(&request);
            let tips = youtube_tags::feedback(title, args.lang)
                .iter()
                .map(|tip| format!("- {tip}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "Title score: {}/100\nRecommended max tags: {}\nPrimary keyword: {}\n\
                 Length: {}w / {}c\n\nTags ({}):\n{}\n\nTips:\n{tips}",
                youtube_tags::title_health(title),
                youtube_tags::recommended_max_tags(title),
                set.primary_keyword,
                title.split_whitespace().count(),
                title.chars().count(),
                set.tags.len(),
                set.joined(),
            )
        }

        Commands::Utm(args) => {
            let mut params = UtmParams {
                source: args.source,
                medium: args.medium,
                campaign: args.campaign,
                term: args.term,
                content: args.content,
            };
            if let Some(preset) = args.preset {
                params.apply_preset(preset);
            }
            let link = utm::build_utm_url(&args.url, &params)?;
            let listed = utm::params_text(&link.url)?;
            format!(
                "{}\n\nHost: {}\nPath: {}\nUTM params: {}\n{listed}",
                link.url, link.host, link.path, link.utm_count
            )
        }

        Commands::Catalog {
            search,
            chip,
            recommend,
            json,
        } => {
            let all = catalog::fallback_catalog();
            let cards = if recommend {
                catalog::pick_recommended(&all, RECOMMENDED_COUNT, &mut rand::thread_rng())
                    .ok_or("not enough tools to recommend")?
            } else {
                catalog::filter_cards(&all, &search, chip)
            };
            if json {
                serde_json::to_string_pretty(&cards)?
            } else {
                cards
                    .iter()
                    .map(|c| {
                        format!(
                            "{} {:<22} [{}] {}",
                            c.icon,
                            c.title,
                            c.category().key(),
                            c.href
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    };
    Ok(output)
}
