use crate::models::{Channel, Video};
use chrono::{DateTime, FixedOffset, Locale, NaiveDate, NaiveDateTime, NaiveTime};

pub const EMPTY_STATE_HTML: &str = r#"<div class="empty-state"><p>No hay resúmenes disponibles. Haz click en "Refresh" para obtener los últimos videos.</p></div>"#;
pub const LOAD_ERROR_HTML: &str =
    r#"<div class="empty-state"><p>Error al cargar los resúmenes</p></div>"#;
pub const REFRESH_ERROR_HTML: &str = r#"<div class="empty-state error-state"><h2>❌ Error</h2><p>Error al actualizar los resúmenes. Verifica la consola para más detalles.</p></div>"#;
pub const REFRESH_ERROR_ALERT: &str = "Error al actualizar los resúmenes";

pub const NO_TRANSCRIPT_HTML: &str =
    r#"<p class="no-transcript">No hay transcripción disponible para este video.</p>"#;
pub const SUMMARY_ERROR_HTML: &str =
    r#"<p class="error-summary">Hubo un error generando el resumen.</p>"#;

/// Substrings the backend writes into `summary` in place of a real summary.
const SUMMARY_ERROR_MARKERS: [&str; 2] = ["Hubo un error", "No hay transcripción"];

/// Everything the page needs besides the channel markup itself.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub content: String,
    pub busy: bool,
    pub alert: Option<String>,
}

pub fn render_summaries(channels: &[Channel]) -> String {
    if channels.is_empty() {
        return EMPTY_STATE_HTML.to_string();
    }

    let mut html = String::new();
    for channel in channels {
        html.push_str(r#"<div class="channel-section">"#);
        html.push_str(r#"<div class="channel-header">"#);
        html.push_str(&format!(
            r#"<div class="channel-name">{}</div>"#,
            channel.channel_name
        ));
        let url = escape_text(&channel.channel_url);
        html.push_str(&format!(
            r#"<a href="{url}" target="_blank" class="channel-url">{url}</a>"#
        ));
        html.push_str("</div>");
        for video in &channel.videos {
            render_video(&mut html, video);
        }
        html.push_str("</div>");
    }
    html
}

fn render_video(html: &mut String, video: &Video) {
    html.push_str(r#"<div class="video-item">"#);
    html.push_str(&format!(
        r#"<div class="video-title"><a href="{}" target="_blank">{}</a></div>"#,
        escape_text(&video.video_url),
        video.title
    ));
    html.push_str(&format!(
        r#"<div class="video-meta">Publicado: {}</div>"#,
        escape_text(&format_date(&video.published_at))
    ));
    html.push_str(r#"<div class="video-summary">"#);
    html.push_str(&summary_markup(video));
    html.push_str("</div>");
    html.push_str("</div>");
}

/// Summary region for one video. Like titles and channel names, the summary is
/// backend markup and goes in unescaped.
pub fn summary_markup(video: &Video) -> String {
    if !video.has_transcript {
        return NO_TRANSCRIPT_HTML.to_string();
    }

    match video.summary.as_deref() {
        Some(summary) if is_usable_summary(summary) => format!("<p>{summary}</p>"),
        _ => SUMMARY_ERROR_HTML.to_string(),
    }
}

fn is_usable_summary(summary: &str) -> bool {
    !summary.is_empty()
        && !SUMMARY_ERROR_MARKERS
            .iter()
            .any(|marker| summary.contains(marker))
}

/// Long-form `es-AR` date, e.g. `15 de enero de 2024`. Accepts RFC 3339,
/// ISO datetimes without an offset (`T` or space separated) and bare
/// `YYYY-MM-DD`; anything else comes back unchanged.
pub fn format_date(raw: &str) -> String {
    const FORMAT: &str = "%-d de %B de %Y";
    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return date.format_localized(FORMAT, Locale::es_AR).to_string();
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        });

    match naive {
        Some(naive) => {
            let date: DateTime<FixedOffset> = naive.and_utc().fixed_offset();
            date.format_localized(FORMAT, Locale::es_AR).to_string()
        }
        None => raw.to_string(),
    }
}

pub fn render_rejection(message: &str) -> String {
    let body = escape_text(message).replace('\n', "<br>");
    format!(
        r#"<div class="empty-state error-state"><h2>❌ Error de Configuración</h2><p>{body}</p></div>"#
    )
}

pub fn render_page(view: &PageView) -> String {
    let loading_class = if view.busy { "loading" } else { "loading hidden" };
    let disabled = if view.busy { " disabled" } else { "" };
    let alert = view
        .alert
        .as_deref()
        .map(alert_script)
        .unwrap_or_default();

    INDEX_HTML
        .replace("{{LOADING_CLASS}}", loading_class)
        .replace("{{DISABLED}}", disabled)
        .replace("{{ALERT}}", &alert)
        .replace("{{CONTENT}}", &view.content)
}

fn alert_script(message: &str) -> String {
    let encoded = serde_json::Value::from(message)
        .to_string()
        .replace("</", "<\\/");
    format!("<script>alert({encoded});</script>")
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Resúmenes de canales</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      margin: 0;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 22px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    button:disabled {
      opacity: 0.55;
      cursor: progress;
    }

    .loading {
      color: #6b645d;
      font-size: 0.95rem;
    }

    .hidden {
      display: none;
    }

    .channel-section {
      display: grid;
      gap: 14px;
    }

    .channel-header {
      display: flex;
      flex-wrap: wrap;
      align-items: baseline;
      gap: 12px;
      border-bottom: 2px solid rgba(47, 72, 88, 0.12);
      padding-bottom: 8px;
    }

    .channel-name {
      font-size: 1.4rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .channel-url {
      color: #8b857d;
      font-size: 0.85rem;
    }

    .video-item {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .video-title a {
      color: var(--ink);
      font-weight: 600;
      text-decoration: none;
    }

    .video-meta {
      font-size: 0.85rem;
      color: #8b857d;
    }

    .video-summary p {
      margin: 0;
      line-height: 1.5;
    }

    .no-transcript,
    .error-summary {
      color: #8b857d;
      font-style: italic;
    }

    .empty-state {
      text-align: center;
      color: #6f6a65;
      padding: 32px 0;
    }

    .error-state h2 {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Resúmenes de canales</h1>
      <form id="refresh-form" method="post" action="/refresh">
        <button id="refreshBtn" type="submit"{{DISABLED}}>Refresh</button>
      </form>
    </header>

    <div id="loading" class="{{LOADING_CLASS}}">Actualizando resúmenes...</div>

    <section id="content">{{CONTENT}}</section>
  </main>

  <script>
    const refreshForm = document.getElementById('refresh-form');
    refreshForm.addEventListener('submit', () => {
      document.getElementById('refreshBtn').disabled = true;
      document.getElementById('loading').classList.remove('hidden');
    });
  </script>
  {{ALERT}}
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: &str, has_transcript: bool, summary: Option<&str>) -> Video {
        Video {
            title: title.to_string(),
            video_url: format!("https://www.youtube.com/watch?v={title}"),
            published_at: "2024-01-15T10:00:00Z".to_string(),
            has_transcript,
            summary: summary.map(str::to_string),
            video_id: None,
            channel_name: None,
            channel_url: None,
            generated_at: None,
        }
    }

    fn channel(name: &str, videos: Vec<Video>) -> Channel {
        Channel {
            channel_name: name.to_string(),
            channel_url: format!("https://www.youtube.com/@{name}"),
            videos,
        }
    }

    #[test]
    fn empty_state_is_the_whole_output() {
        assert_eq!(render_summaries(&[]), EMPTY_STATE_HTML);
    }

    #[test]
    fn videos_render_once_each_in_order() {
        let channels = vec![
            channel(
                "rava",
                vec![
                    video("first", true, Some("uno")),
                    video("second", false, None),
                    video("third", true, None),
                ],
            ),
            channel("bull", vec![video("fourth", true, Some("cuatro"))]),
        ];

        let html = render_summaries(&channels);
        assert_eq!(html.matches(r#"class="video-item""#).count(), 4);
        assert_eq!(html.matches(r#"class="channel-section""#).count(), 2);

        let positions: Vec<usize> = ["first", "second", "third", "fourth"]
            .iter()
            .map(|title| html.find(&format!(">{title}</a>")).expect("missing title"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(html.find(">rava<").unwrap() < html.find(">bull<").unwrap());
    }

    #[test]
    fn no_transcript_wins_over_summary() {
        let markup = summary_markup(&video("v", false, Some("Un resumen valido")));
        assert_eq!(markup, NO_TRANSCRIPT_HTML);
    }

    #[test]
    fn error_sentinels_are_never_shown_raw() {
        for summary in [
            "Hubo un error generando el resumen.",
            "No hay transcripción disponible para este video.",
            "Texto previo. Hubo un error al llamar a la API",
        ] {
            let markup = summary_markup(&video("v", true, Some(summary)));
            assert_eq!(markup, SUMMARY_ERROR_HTML);
        }
    }

    #[test]
    fn missing_summary_with_transcript_is_an_error() {
        assert_eq!(summary_markup(&video("v", true, None)), SUMMARY_ERROR_HTML);
        assert_eq!(summary_markup(&video("v", true, Some(""))), SUMMARY_ERROR_HTML);
    }

    #[test]
    fn clean_summary_is_verbatim() {
        let summary = "El mercado <b>subió</b> un 3% & cerró en alza.";
        let html = render_summaries(&[channel("c", vec![video("v", true, Some(summary))])]);
        assert!(html.contains(summary));
    }

    #[test]
    fn entity_encoded_titles_are_not_double_encoded() {
        let mut title = video("Don&#39;t panic", true, Some("ok"));
        title.video_url = "https://www.youtube.com/watch?v=x1".to_string();
        let mut tom = channel("Tom &amp; Jerry", vec![title]);
        tom.channel_url = "https://www.youtube.com/c/Jos%C3%A9?a=1&b=2".to_string();
        let html = render_summaries(&[tom]);

        assert!(html.contains(r#"<div class="channel-name">Tom &amp; Jerry</div>"#));
        assert!(html.contains(">Don&#39;t panic</a>"));
        assert!(!html.contains("&amp;#39;"));
        assert!(html.contains(r#"href="https://www.youtube.com/c/Jos%C3%A9?a=1&amp;b=2""#));
    }

    #[test]
    fn dates_use_long_spanish_form() {
        assert_eq!(format_date("2024-01-15T10:00:00Z"), "15 de enero de 2024");
        assert_eq!(format_date("2023-09-03T23:30:00-03:00"), "3 de septiembre de 2023");
        assert_eq!(format_date("2024-12-01"), "1 de diciembre de 2024");
        assert_eq!(format_date("2024-01-15T10:00:00"), "15 de enero de 2024");
        assert_eq!(format_date("2024-01-15 10:00:00"), "15 de enero de 2024");
        assert_eq!(format_date("2024-03-02T08:15:30.250"), "2 de marzo de 2024");
        assert_eq!(format_date("ayer"), "ayer");
    }

    #[test]
    fn rejection_converts_newlines_to_breaks() {
        let html = render_rejection("API key missing\n\nSet YOUTUBE_API_KEY");
        assert!(html.contains("<p>API key missing<br><br>Set YOUTUBE_API_KEY</p>"));
        assert!(html.contains("Error de Configuración"));
    }

    #[test]
    fn page_reflects_busy_state() {
        let idle = render_page(&PageView {
            content: EMPTY_STATE_HTML.to_string(),
            busy: false,
            alert: None,
        });
        assert!(idle.contains(r#"<button id="refreshBtn" type="submit">"#));
        assert!(idle.contains(r#"class="loading hidden""#));
        assert!(!idle.contains("alert("));

        let busy = render_page(&PageView {
            content: String::new(),
            busy: true,
            alert: None,
        });
        assert!(busy.contains(r#"<button id="refreshBtn" type="submit" disabled>"#));
        assert!(busy.contains(r#"class="loading""#));
    }

    #[test]
    fn alert_message_is_script_safe() {
        let page = render_page(&PageView {
            content: String::new(),
            busy: false,
            alert: Some("fallo </script>\n\"x\"".to_string()),
        });
        assert!(page.contains(r#"<script>alert("fallo <\/script>\n\"x\"");</script>"#));
    }
}
