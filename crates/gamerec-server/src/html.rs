//! Server-rendered HTML pages.
//!
//! Pages are plain strings. Every catalog value goes through [`escape`] before
//! it is written, whether it lands in text or in an attribute.

use gamerec_core::{catalog::SearchResults, game::Game};
use quick_xml::escape::escape;

const STYLE: &str = "
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
nav a { margin-right: 1rem; }
form { display: flex; flex-wrap: wrap; gap: .5rem; margin-bottom: 1.5rem; }
.games { display: grid; grid-template-columns: repeat(auto-fill, minmax(11rem, 1fr)); gap: 1rem; }
.game { border: 1px solid #ccc; border-radius: 6px; padding: .75rem; }
.game img { width: 100%; }
.game h3 { margin: .25rem 0; font-size: 1rem; }
.game p { margin: .1rem 0; font-size: .85rem; color: #444; }
.empty { color: #666; }
";

/// Drives the "Show more" and "Played it" buttons on the search page.
const SEARCH_SCRIPT: &str = r#"
(function () {
  const list = document.getElementById('games');
  if (!list || !list.dataset.genre) return;
  const state = {
    genre: list.dataset.genre,
    offset: Number(list.dataset.offset),
    excluded_ids: JSON.parse(list.dataset.excluded),
  };

  function line(text) {
    const p = document.createElement('p');
    p.textContent = text;
    return p;
  }

  function card(game) {
    const el = document.createElement('article');
    el.className = 'game';
    el.dataset.id = game.id;
    if (game.poster) {
      const img = document.createElement('img');
      img.src = game.poster;
      img.alt = game.title;
      el.appendChild(img);
    }
    const h = document.createElement('h3');
    h.textContent = game.title;
    el.appendChild(h);
    el.appendChild(line(game.genre + (game.year ? ' · ' + game.year : '')));
    if (game.developer) el.appendChild(line(game.developer));
    if (game.criticscore != null) el.appendChild(line('Critics: ' + game.criticscore));
    const btn = document.createElement('button');
    btn.className = 'played';
    btn.textContent = 'Played it';
    el.appendChild(btn);
    return el;
  }

  async function post(path, body) {
    const resp = await fetch(path, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(body),
    });
    return { ok: resp.ok, body: await resp.json() };
  }

  document.getElementById('more').addEventListener('click', async function () {
    const { ok, body } = await post('/show_more', state);
    if (!ok) return alert(body.message);
    body.recommendations.forEach(function (game) {
      state.excluded_ids.push(game.id);
      list.appendChild(card(game));
    });
    if (body.recommendations.length === 0) this.disabled = true;
  });

  list.addEventListener('click', async function (event) {
    if (!event.target.classList.contains('played')) return;
    const old = event.target.closest('.game');
    const { ok, body } = await post('/mark_played', {
      game_id: Number(old.dataset.id),
      genre: state.genre,
      offset: state.offset,
      excluded_ids: state.excluded_ids,
    });
    if (!ok || body.id === undefined) return alert(body.message);
    state.excluded_ids.push(body.id);
    old.replaceWith(card(body));
  });
})();
"#;

// ─── Layout ───────────────────────────────────────────────────────────────────

fn layout(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
     <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
     <nav><a href=\"/\">Home</a><a href=\"/search\">Search</a>\
     <a href=\"/recommendations\">Recommendations</a></nav>\n{body}\n</body>\n</html>\n",
    title = escape(title),
  )
}

fn game_card(out: &mut String, game: &Game, playable: bool) {
  out.push_str(&format!("<article class=\"game\" data-id=\"{}\">", game.id));
  if let Some(poster) = &game.poster {
    out.push_str(&format!(
      "<img src=\"{}\" alt=\"{}\">",
      escape(poster.as_str()),
      escape(game.title.as_str())
    ));
  }
  out.push_str(&format!("<h3>{}</h3>", escape(game.title.as_str())));
  out.push_str(&format!("<p>{}", escape(game.genre.as_str())));
  if let Some(year) = game.year {
    out.push_str(&format!(" · {year}"));
  }
  out.push_str("</p>");
  for line in [&game.developer, &game.platform].into_iter().flatten() {
    out.push_str(&format!("<p>{}</p>", escape(line.as_str())));
  }
  if let Some(score) = game.criticscore {
    out.push_str(&format!("<p>Critics: {score}</p>"));
  }
  if let Some(score) = game.userscore {
    out.push_str(&format!("<p>Users: {score}</p>"));
  }
  if playable {
    out.push_str("<button class=\"played\">Played it</button>");
  }
  out.push_str("</article>");
}

fn text_input(out: &mut String, name: &str, placeholder: &str, value: Option<&str>) {
  out.push_str(&format!(
    "<input name=\"{name}\" placeholder=\"{placeholder}\" value=\"{}\">",
    escape(value.unwrap_or_default())
  ));
}

// ─── Pages ────────────────────────────────────────────────────────────────────

pub fn index_page() -> String {
  layout(
    "Game Finder",
    "<h1>Game Finder</h1>\n\
     <p>Search the catalog by title, genre, developer or minimum critic score, \
     then mark games as played to get a fresh pick from the same genre.</p>\n\
     <p><a href=\"/search\">Search games</a> or \
     <a href=\"/recommendations\">get recommendations</a>.</p>",
  )
}

/// Values echoed back into the search form.
#[derive(Debug, Default)]
pub struct SearchEcho<'a> {
  pub title:       Option<&'a str>,
  pub genre:       Option<&'a str>,
  pub developer:   Option<&'a str>,
  pub criticscore: Option<&'a str>,
}

/// The search form, plus results when a search has been run.
pub fn search_page(echo: &SearchEcho<'_>, results: Option<&SearchResults>) -> String {
  let mut body = String::from("<h1>Search games</h1>\n<form method=\"post\" action=\"/search\">");
  text_input(&mut body, "title", "Title", echo.title);
  text_input(&mut body, "genre", "Genre", echo.genre);
  text_input(&mut body, "developer", "Developer", echo.developer);
  text_input(&mut body, "criticscore", "Min critic score", echo.criticscore);
  body.push_str("<button type=\"submit\">Search</button></form>\n");

  if let Some(results) = results {
    if results.games.is_empty() {
      body.push_str("<p class=\"empty\">No games matched.</p>");
    } else {
      render_results(&mut body, results);
    }
  }

  layout("Search games", &body)
}

fn render_results(out: &mut String, results: &SearchResults) {
  let genre = results.genre.as_deref().unwrap_or_default();
  // Paging and substitution only make sense inside a genre.
  let playable = !genre.is_empty();
  let excluded = serde_json::to_string(&results.excluded_ids).unwrap_or_else(|_| "[]".into());

  out.push_str(&format!(
    "<section id=\"games\" class=\"games\" data-genre=\"{}\" data-offset=\"{}\" \
     data-excluded=\"{}\">",
    escape(genre),
    results.offset,
    escape(excluded.as_str()),
  ));
  for game in &results.games {
    game_card(out, game, playable);
  }
  out.push_str("</section>\n");

  if playable {
    out.push_str("<p><button id=\"more\">Show more</button></p>\n");
    out.push_str(&format!("<script>{SEARCH_SCRIPT}</script>"));
  }
}

/// The recommendation form and up to one page of games.
pub fn recommendations_page(title: Option<&str>, games: Option<&[Game]>) -> String {
  let mut body = String::from(
    "<h1>Recommendations</h1>\n<form method=\"post\" action=\"/recommendations\">",
  );
  text_input(&mut body, "title", "A game you liked (blank for random)", title);
  body.push_str("<button type=\"submit\">Recommend</button></form>\n");

  match games {
    None => {}
    Some([]) => body.push_str("<p class=\"empty\">No recommendations found.</p>"),
    Some(games) => {
      body.push_str("<section class=\"games\">");
      for game in games {
        game_card(&mut body, game, false);
      }
      body.push_str("</section>");
    }
  }

  layout("Recommendations", &body)
}
