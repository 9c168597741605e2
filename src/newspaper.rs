//! Lays the sorted stories out as a printable front page.

pub(crate) const NUM_COLUMNS: usize = 3;
pub(crate) const STORIES_PER_COLUMN: usize = 9;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TextLengths {
    pub(crate) featured: usize,
    pub(crate) column: usize,
}

/// The highest scoring story runs across the top, the next ones fill the
/// columns one column at a time.
#[derive(Debug)]
pub(crate) struct FrontPage<'a> {
    pub(crate) featured: &'a crate::Story,
    pub(crate) columns: Vec<Vec<&'a crate::Story>>,
}

pub(crate) fn layout(stories: &[crate::Story]) -> anyhow::Result<FrontPage<'_>> {
    let Some((featured, rest)) = stories.split_first() else {
        anyhow::bail!("No stories to render");
    };

    let columns = rest
        .iter()
        .take(NUM_COLUMNS * STORIES_PER_COLUMN)
        .collect::<Vec<_>>()
        .chunks(STORIES_PER_COLUMN)
        .map(<[_]>::to_vec)
        .chain(std::iter::repeat_with(Vec::new))
        .take(NUM_COLUMNS)
        .collect();

    Ok(FrontPage { featured, columns })
}

pub(crate) fn render(
    stories: &[crate::Story],
    masthead: &crate::masthead::Masthead,
    lengths: TextLengths,
) -> anyhow::Result<String> {
    let front_page = layout(stories)?;

    let featured = featured_article(front_page.featured, lengths.featured);

    let columns: String = front_page
        .columns
        .iter()
        .map(|column| {
            let articles: String = column
                .iter()
                .map(|story| column_article(story, lengths.column))
                .collect();
            format!("        <div class=\"column-grid\">{articles}\n        </div>\n")
        })
        .collect();

    Ok(page(masthead, &featured, &columns))
}

fn source_line(story: &crate::Story) -> String {
    match story.url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => format!(
            "Originally written and published on: {}",
            crate::text::escape_html(url)
        ),
        None => "Discussion on Hacker News".to_string(),
    }
}

fn byline(story: &crate::Story) -> String {
    let author = story
        .by
        .as_deref()
        .filter(|by| !by.is_empty())
        .unwrap_or("Unknown");

    format!(
        "by <strong>{}</strong> | {} points | {} comments | {}",
        crate::text::escape_html(author),
        story.score,
        story.descendants,
        format_story_date(story.time),
    )
}

fn kicker(story: &crate::Story) -> String {
    let domain = story
        .url
        .as_deref()
        .map(crate::text::domain_from_url)
        .unwrap_or_default();

    if domain.is_empty() {
        String::new()
    } else {
        format!(
            "<p class=\"kicker\">{}</p>",
            crate::text::escape_html(&domain)
        )
    }
}

fn excerpt(story: &crate::Story, max_length: usize, class: &str) -> String {
    let text = crate::text::format_story_text(story.text.as_deref().unwrap_or_default(), max_length);

    if text.is_empty() {
        String::new()
    } else {
        format!("<p class=\"{class}\">{text}</p>")
    }
}

/// Story timestamps are printed as `M/D/YYYY` in the local timezone, like
/// the masthead date.
pub(crate) fn format_story_date(time: i64) -> String {
    chrono::DateTime::from_timestamp(time, 0)
        .map(|date| {
            date.with_timezone(&chrono::Local)
                .format("%-m/%-d/%Y")
                .to_string()
        })
        .unwrap_or_default()
}

fn featured_article(story: &crate::Story, max_length: usize) -> String {
    format!(
        r#"
            <div class="newspaper-container col-span-2 mb-10 pb-8 border-b-2 border-gray-400 text-center">
                {kicker}
                <h3 class="text-5xl font-bold mb-4 uppercase tracking-tight leading-tight">{title}</h3>
                <div class="border-t border-gray-400 mb-4 pt-3 max-w-2xl mx-auto">
                    <p class="text-sm italic text-gray-700 mb-2">{source}</p>
                    <p class="text-sm text-gray-600">{byline}</p>
                </div>
                {excerpt}
            </div>"#,
        kicker = kicker(story),
        title = crate::text::escape_html(&story.title),
        source = source_line(story),
        byline = byline(story),
        excerpt = excerpt(story, max_length, "text-base text-justify max-w-3xl mx-auto"),
    )
}

fn column_article(story: &crate::Story, max_length: usize) -> String {
    format!(
        r#"
            <div class="story-cell pb-6">
                {kicker}
                <h3 class="text-base font-bold mb-1 uppercase tracking-tight leading-tight line-clamp-2">{title}</h3>
                <div class="border-t border-gray-400 mb-1 pt-1 flex-1 flex flex-col justify-between">
                    <p class="text-xs italic text-gray-700 mb-1 line-clamp-2">{source}</p>
                    <p class="text-xs text-gray-600">{byline}</p>
                </div>
                {excerpt}
            </div>"#,
        kicker = kicker(story),
        title = crate::text::escape_html(&story.title),
        source = source_line(story),
        byline = byline(story),
        excerpt = excerpt(story, max_length, "text-xs text-justify mt-1"),
    )
}

fn page(masthead: &crate::masthead::Masthead, featured: &str, columns: &str) -> String {
    format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>The Hacker News Times | {header_date}</title>
  <script src="https://cdn.tailwindcss.com"></script>
  <link href="https://fonts.googleapis.com/css2?family=Old+Standard+TT:wght@400;700&amp;family=UnifrakturMaguntia&amp;display=swap" rel="stylesheet"/>
  <style>
    body {{
      font-family: 'Old Standard TT', Georgia, serif;
      background: #f4f1ea;
      color: #111;
    }}
    .masthead-title {{
      font-family: 'UnifrakturMaguntia', 'Old English Text MT', serif;
    }}
    .kicker {{
      font-size: 0.65rem;
      letter-spacing: 0.15em;
      text-transform: uppercase;
      color: #555;
      margin-bottom: 0.25rem;
    }}
    .columns {{
      display: grid;
      grid-template-columns: repeat(3, minmax(0, 1fr));
      gap: 2rem;
    }}
    .column-grid {{
      display: grid;
      grid-template-rows: repeat(9, auto);
      border-left: 1px solid #9ca3af;
      padding-left: 1rem;
    }}
    .column-grid:first-child {{
      border-left: none;
      padding-left: 0;
    }}
    .story-cell {{
      display: flex;
      flex-direction: column;
    }}
    @media print {{
      body {{
        background: #fff;
      }}
      .no-print {{
        display: none !important;
      }}
      .story-cell {{
        break-inside: avoid;
      }}
      @page {{
        size: A3 portrait;
        margin: 12mm;
      }}
    }}
  </style>
</head>
<body>
  <div class="no-print flex justify-center gap-4 py-4">
    <button class="border border-gray-800 px-4 py-2 uppercase tracking-widest text-sm" onclick="window.print()">Print</button>
    <button class="border border-gray-800 px-4 py-2 uppercase tracking-widest text-sm" onclick="document.getElementById('help').showModal()">Help</button>
  </div>

  <dialog id="help" class="no-print max-w-md p-6 border border-gray-800">
    <h2 class="text-xl font-bold mb-2 uppercase">How to print</h2>
    <p class="text-sm mb-2">Press the Print button or use your browser's print command.</p>
    <p class="text-sm mb-4">The controls are left off the printed page. Large paper in portrait works best.</p>
    <form method="dialog"><button class="border border-gray-800 px-3 py-1 text-sm uppercase">Close</button></form>
  </dialog>

  <main id="newspaper" class="max-w-6xl mx-auto bg-white px-10 py-8 shadow">
    <header class="text-center border-b-4 border-double border-gray-800 pb-4 mb-6">
      <div class="flex justify-between text-xs uppercase tracking-widest border-b border-gray-400 pb-1 mb-2">
        <span id="volume">{volume}</span>
        <span id="date">{long_date}</span>
        <span>Price: Free</span>
      </div>
      <h1 class="masthead-title text-7xl my-2">The Hacker News Times</h1>
      <p id="headerDate" class="text-sm italic">{header_date}</p>
    </header>

    <section id="topStoryContainer" class="grid grid-cols-2">{featured}
    </section>

    <section id="articlesContainer" class="columns">
{columns}    </section>
  </main>
</body>
</html>
"####,
        header_date = masthead.header_date,
        long_date = masthead.long_date,
        volume = masthead.volume,
    )
}
