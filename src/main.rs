use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod config;
pub(crate) mod hn_api;
pub(crate) mod masthead;
pub(crate) mod newspaper;
pub(crate) mod output;
pub(crate) mod text;

pub(crate) static CLIENT: std::sync::LazyLock<reqwest::Client> =
    std::sync::LazyLock::new(reqwest::Client::new);

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "newspaper.html")]
    #[arg(help = "Where to write the newspaper")]
    output: std::path::PathBuf,

    #[arg(long, default_value = "false")]
    #[arg(help = "Open the newspaper in the browser for printing")]
    open: bool,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Export the stories to json in the export directory")]
    export_json: bool,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=999))]
    #[arg(help = "Volume number to print in the masthead, random when not set")]
    volume: Option<u32>,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Log to console")]
    log_to_console: bool,
}

#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
struct Story {
    id: i64,

    #[serde(default)]
    title: String,

    url: Option<String>,
    text: Option<String>,
    by: Option<String>,

    #[serde(default)]
    score: i64,
    #[serde(default)]
    descendants: i64,
    #[serde(default)]
    time: i64,

    #[serde(rename = "type", default)]
    story_type: String,
}

fn remove_non_stories(stories: Vec<Story>) -> Vec<Story> {
    stories
        .into_iter()
        .filter(|s| s.story_type == "story" && !s.title.trim().is_empty())
        .collect()
}

fn sort_stories(stories: &mut [Story]) {
    stories.sort_by(|a, b| b.score.cmp(&a.score));
}

async fn get_stories(config: &config::Config) -> anyhow::Result<Vec<Story>> {
    let story_ids = hn_api::get_top_story_ids(&config.api_base, config.num_stories).await?;

    tracing::info!(num_story_ids = story_ids.len(), "Got top story ids");

    let fetched = hn_api::fetch_in_batches(&story_ids, config.batch_size, |id| {
        hn_api::get_item(&config.api_base, id)
    })
    .await;

    tracing::info!(
        num_stories = fetched.stories.len(),
        num_missing = fetched.missing.len(),
        batches = fetched.batches,
        "Fetched stories"
    );

    let num_stories = fetched.stories.len();
    let mut stories = remove_non_stories(fetched.stories);
    tracing::info!(
        num_removed = num_stories - stories.len(),
        "Removed items that are not stories"
    );

    sort_stories(&mut stories);

    Ok(stories)
}

async fn make_newspaper(args: Args, config: config::Config) -> anyhow::Result<()> {
    let stories = get_stories(&config).await?;

    if args.export_json {
        let path = output::export_json(&stories)?;
        tracing::info!(path =? path, "Exported stories");
    }

    let masthead = masthead::Masthead::for_today(args.volume)?;
    let html = newspaper::render(
        &stories,
        &masthead,
        newspaper::TextLengths {
            featured: config.featured_text_length,
            column: config.column_text_length,
        },
    )?;

    output::write_newspaper(&args.output, &html)?;
    tracing::info!(
        path =? args.output,
        num_stories = stories.len(),
        volume = masthead.volume,
        "Wrote newspaper"
    );

    if args.open {
        output::open_for_printing(&args.output)?;
        tracing::info!(path =? args.output, "Opened newspaper for printing");
    }

    Ok(())
}

fn report_error(error: &anyhow::Error) {
    eprintln!("error: {error}");

    for (i, cause) in error.chain().skip(1).enumerate() {
        if i == 0 {
            eprintln!();
            eprintln!("because:");
        }
        eprintln!("- {cause}");
    }
}

#[tokio::main]
async fn main() {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    use clap::Parser;
    let args = Args::parse();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            report_error(&e);
            std::process::exit(2);
        }
    };

    let file_appender = tracing_appender::rolling::daily("./log", "hn_newspaper.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer();
    let file_layer = file_layer
        .with_writer(non_blocking)
        .json()
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let pretty_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stdout)
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let registry = tracing_subscriber::registry().with(file_layer);

    if config.log_to_console || args.log_to_console {
        registry.with(pretty_layer).init();
    } else {
        registry.init();
    };

    tracing::info!(
        config =? config,
        args =? args,
        "Starting HN Newspaper"
    );

    let timeout = std::time::Duration::from_secs(config.run_timeout_secs);
    let result = tokio::select! {
        res = make_newspaper(args, config) => res,
        _ = tokio::time::sleep(timeout) => {
            Err(anyhow::anyhow!("Timed out after {} seconds", timeout.as_secs()))
        }
    };

    match result {
        Ok(()) => tracing::info!("HN Newspaper finished"),
        Err(e) => {
            tracing::error!(error =? e, "Error when making newspaper");
            report_error(&e);
            drop(guard);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(id: i64, score: i64) -> Story {
        Story {
            id,
            score,
            title: format!("Story {id}"),
            story_type: "story".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sort_stories() {
        let mut stories = vec![story(0, 10), story(1, 50), story(2, 0)];

        sort_stories(&mut stories);

        let scores: Vec<i64> = stories.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![50, 10, 0]);
    }

    #[test]
    fn test_sort_stories_is_descending() {
        let mut stories: Vec<Story> = [3, 900, 12, 12, 450, 1]
            .iter()
            .enumerate()
            .map(|(id, &score)| story(id as i64, score))
            .collect();

        sort_stories(&mut stories);

        assert!(stories.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(stories[0].id, 1);
    }

    #[test]
    fn test_remove_non_stories() {
        let job = Story {
            story_type: "job".to_string(),
            ..story(1, 5)
        };
        let untitled = Story {
            title: "".to_string(),
            ..story(2, 5)
        };
        let blank_title = Story {
            title: "   ".to_string(),
            ..story(3, 5)
        };
        let poll = Story {
            story_type: "poll".to_string(),
            ..story(4, 5)
        };

        let stories = remove_non_stories(vec![story(0, 5), job, untitled, blank_title, poll]);

        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, 0);
    }

    #[test]
    fn test_story_deserializes_api_item() {
        let json = r#"{
            "by": "dhouston",
            "descendants": 71,
            "id": 8863,
            "kids": [8952, 9224],
            "score": 111,
            "time": 1175714200,
            "title": "My YC app: Dropbox - Throw away your USB drive",
            "type": "story",
            "url": "http://www.getdropbox.com/u/2/screencast.html"
        }"#;

        let story: Story = serde_json::from_str(json).unwrap();

        assert_eq!(story.id, 8863);
        assert_eq!(story.by.as_deref(), Some("dhouston"));
        assert_eq!(story.score, 111);
        assert_eq!(story.descendants, 71);
        assert_eq!(story.time, 1175714200);
        assert_eq!(story.story_type, "story");
        assert!(story.text.is_none());
    }

    #[test]
    fn test_deleted_item_is_filtered_out() {
        let json = r#"{"deleted": true, "id": 42, "time": 1700000000, "type": "story"}"#;
        let story: Story = serde_json::from_str(json).unwrap();

        assert_eq!(story.score, 0);
        assert!(remove_non_stories(vec![story]).is_empty());
    }

    #[test]
    fn test_null_item_is_an_error() {
        assert!(serde_json::from_str::<Story>("null").is_err());
    }

    #[tokio::test]
    async fn test_fetch_filter_sort_pipeline() {
        let ids: Vec<i64> = (1..=28).collect();

        let fetched = hn_api::fetch_in_batches(&ids, 10, |id| async move {
            match id {
                5 => anyhow::bail!("connection reset"),
                7 => anyhow::Ok(Story {
                    story_type: "job".to_string(),
                    ..story(id, 1000)
                }),
                _ => anyhow::Ok(story(id, id * 3 % 17)),
            }
        })
        .await;

        assert_eq!(fetched.batches, 3);
        assert_eq!(fetched.missing, vec![5]);

        let mut stories = remove_non_stories(fetched.stories);
        sort_stories(&mut stories);

        assert_eq!(stories.len(), 26);
        assert!(stories.iter().all(|s| s.id != 5 && s.id != 7));
        assert!(stories.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
