use crate::models::{AppData, Habit};

pub fn render_index(data: &AppData) -> String {
    let stats = &data.stats;
    INDEX_HTML
        .replace("{{SCORE}}", &stats.aura_score.to_string())
        .replace("{{CURRENT}}", &stats.current_streak.to_string())
        .replace("{{LONGEST}}", &stats.longest_streak.to_string())
        .replace("{{HABITS}}", &render_habits(&data.habits))
}

fn render_habits(habits: &[Habit]) -> String {
    if habits.is_empty() {
        return r#"<li class="empty">No habits yet. Add one below.</li>"#.to_string();
    }

    habits
        .iter()
        .map(|habit| {
            format!(
                r#"<li class="habit-item" data-id="{id}">
          <form method="post" action="/habits/{id}/toggle">
            <label>
              <input type="checkbox" data-id="{id}"{checked} onchange="this.form.requestSubmit()" />
              <span class="habit-name">{name}</span>
            </label>
            <span class="habit-points">+{points}</span>
          </form>
        </li>"#,
                id = habit.id,
                checked = if habit.completed { " checked" } else { "" },
                name = escape_html(&habit.name),
                points = habit.points,
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>AuraTrack</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef1f8;
      --bg-2: #c9c2f2;
      --ink: #24223a;
      --accent: #7b5cff;
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
        linear-gradient(135deg, var(--bg-1), #e6e0ff 60%, #f4f2fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.score {
      color: var(--accent);
    }

    #habit-list {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .habit-item form {
      display: flex;
      align-items: center;
      justify-content: space-between;
      background: white;
      border-radius: 16px;
      padding: 14px 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .habit-item label {
      display: flex;
      align-items: center;
      gap: 12px;
      cursor: pointer;
    }

    .habit-item input[type="checkbox"] {
      width: 20px;
      height: 20px;
      accent-color: var(--accent);
    }

    .habit-points {
      font-weight: 600;
      color: var(--accent);
    }

    .empty {
      color: #7a746d;
    }

    #add-form {
      display: flex;
      gap: 12px;
    }

    #add-form input {
      flex: 1;
      border-radius: 999px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      padding: 14px 18px;
      font: inherit;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(123, 92, 255, 0.3);
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>AuraTrack</h1>
      <p class="subtitle">Check off your habits each day to grow your aura.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Aura score</span>
        <span id="aura-score" class="value score">{{SCORE}}</span>
      </div>
      <div class="stat">
        <span class="label">Current streak</span>
        <span id="current-streak" class="value">{{CURRENT}}</span>
      </div>
      <div class="stat">
        <span class="label">Longest streak</span>
        <span id="longest-streak" class="value">{{LONGEST}}</span>
      </div>
    </section>

    <ul id="habit-list">
        {{HABITS}}
    </ul>

    <form id="add-form" method="post" action="/habits">
      <input id="new-habit" name="name" type="text" placeholder="New habit" autocomplete="off" />
      <button id="add-btn" type="submit">Add</button>
    </form>

    <div class="status" id="status"></div>
    <p class="hint">Completions reset each new day (server time). Come back tomorrow to keep your streak.</p>
  </main>

  <script>
    const scoreEl = document.getElementById('aura-score');
    const currentEl = document.getElementById('current-streak');
    const longestEl = document.getElementById('longest-streak');
    const listEl = document.getElementById('habit-list');
    const inputEl = document.getElementById('new-habit');
    const statusEl = document.getElementById('status');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const renderStats = (stats) => {
      scoreEl.textContent = stats.auraScore;
      currentEl.textContent = stats.currentStreak;
      longestEl.textContent = stats.longestStreak;
    };

    const renderHabits = (habits) => {
      listEl.innerHTML = '';
      if (!habits.length) {
        const li = document.createElement('li');
        li.className = 'empty';
        li.textContent = 'No habits yet. Add one below.';
        listEl.appendChild(li);
        return;
      }
      habits.forEach((habit) => {
        const li = document.createElement('li');
        li.className = 'habit-item';
        const row = document.createElement('form');
        const label = document.createElement('label');
        const checkbox = document.createElement('input');
        checkbox.type = 'checkbox';
        checkbox.checked = habit.completed;
        checkbox.addEventListener('change', () => {
          toggle(habit.id).catch((err) => setStatus(err.message, 'error'));
        });
        const name = document.createElement('span');
        name.className = 'habit-name';
        name.textContent = habit.name;
        const points = document.createElement('span');
        points.className = 'habit-points';
        points.textContent = `+${habit.points}`;
        label.append(checkbox, name);
        row.append(label, points);
        li.appendChild(row);
        listEl.appendChild(li);
      });
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const refresh = async () => {
      const data = await request('/api/state');
      renderStats(data.stats);
      renderHabits(data.habits);
    };

    const toggle = async (id) => {
      const data = await request(`/api/habits/${id}/toggle`, { method: 'POST' });
      renderStats(data.stats);
      await refresh();
    };

    document.getElementById('add-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const name = inputEl.value.trim();
      if (!name) {
        return;
      }
      request('/api/habits', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ name })
      })
        .then(() => {
          inputEl.value = '';
          setStatus('', '');
          return refresh();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stats;

    #[test]
    fn index_shows_stats_and_habits_in_order() {
        let data = AppData {
            stats: Stats {
                aura_score: 15,
                current_streak: 3,
                longest_streak: 8,
                last_visit_date: None,
            },
            habits: vec![
                Habit { id: 1, name: "Read".into(), points: 5, completed: true },
                Habit { id: 2, name: "Run".into(), points: 10, completed: false },
            ],
        };

        let html = render_index(&data);
        assert!(html.contains(r#"<span id="aura-score" class="value score">15</span>"#));
        assert!(html.contains(r#"<span id="longest-streak" class="value">8</span>"#));
        assert!(html.contains(r#"data-id="1" checked"#));
        assert!(html.contains("+10"));
        assert!(html.find("Read").unwrap() < html.find("Run").unwrap());
    }

    #[test]
    fn habit_names_are_escaped() {
        let data = AppData {
            stats: Stats::default(),
            habits: vec![Habit {
                id: 1,
                name: "<b>Drink</b> & stretch".into(),
                points: 5,
                completed: false,
            }],
        };

        let html = render_index(&data);
        assert!(html.contains("&lt;b&gt;Drink&lt;/b&gt; &amp; stretch"));
        assert!(!html.contains("<b>Drink</b>"));
    }

    #[test]
    fn empty_list_shows_placeholder() {
        assert!(render_index(&AppData::default()).contains("No habits yet"));
    }
}
