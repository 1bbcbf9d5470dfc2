pub fn render_index(date: &str) -> String {
    INDEX_HTML.replace("{{DATE}}", date)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Grid</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef4ef;
      --bg-2: #cfe3d4;
      --ink: #24302a;
      --accent: #2f8f5b;
      --accent-2: #30475e;
      --miss: #d96c47;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(48, 71, 94, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3efe6 60%, #f2f7f3 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #54635b;
      font-size: 1rem;
    }

    .hidden {
      display: none !important;
    }

    .setup {
      display: grid;
      gap: 12px;
      max-width: 420px;
    }

    .setup input {
      border: 1px solid rgba(48, 71, 94, 0.25);
      border-radius: 14px;
      padding: 14px 16px;
      font-size: 1rem;
      font-family: inherit;
    }

    .setup input.error {
      border-color: var(--miss);
    }

    .error-text {
      color: #b8432a;
      font-size: 0.9rem;
      min-height: 1.2em;
      margin: 0;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 22px;
      font-size: 1rem;
      font-weight: 600;
      font-family: inherit;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-primary {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 143, 91, 0.3);
    }

    .identity {
      display: flex;
      flex-wrap: wrap;
      align-items: baseline;
      justify-content: space-between;
      gap: 8px;
      color: #54635b;
    }

    .identity strong {
      color: var(--ink);
      font-size: 1.1rem;
    }

    .record {
      display: grid;
      gap: 10px;
      justify-items: start;
    }

    .done-note {
      color: var(--accent);
      font-weight: 600;
      margin: 0;
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
      border: 1px solid rgba(48, 71, 94, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8a82;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .grid-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(48, 71, 94, 0.08);
      overflow-x: auto;
    }

    .grid {
      display: grid;
      gap: 2px;
      font-size: 0.9rem;
      min-width: 560px;
    }

    .grid-cell {
      padding: 8px 6px;
      text-align: center;
      border-radius: 8px;
    }

    .corner-header,
    .date-header {
      font-weight: 600;
      color: #54635b;
      font-size: 0.8rem;
    }

    .date-header .day-of-week {
      display: block;
      font-weight: 400;
      color: #93a098;
    }

    .user-name {
      text-align: left;
      font-weight: 500;
      white-space: nowrap;
    }

    .user-name.current-user {
      color: var(--accent);
    }

    .streak-cell {
      font-weight: 600;
    }

    .done {
      background: rgba(47, 143, 91, 0.16);
      color: var(--accent);
      font-weight: 700;
    }

    .today {
      outline: 2px solid rgba(47, 143, 91, 0.35);
    }

    .status {
      font-size: 0.95rem;
      color: #667a6e;
      min-height: 1.2em;
      margin: 0;
    }

    .status[data-type="error"] {
      color: #b8432a;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habit Grid</h1>
      <p class="subtitle">Did you do your squats today? One tap a day keeps the streak alive.</p>
    </header>

    <section id="user-setup" class="setup hidden">
      <label for="username">Pick a name everyone will see</label>
      <input id="username" maxlength="32" autocomplete="off" placeholder="e.g. ironlegs" />
      <p id="username-error" class="error-text"></p>
      <button id="save-username" class="btn-primary" type="button">Join the board</button>
    </section>

    <section id="main-app" class="hidden">
      <div class="identity">
        <span>Signed in as <strong id="current-username"></strong></span>
        <span id="today-label">{{DATE}}</span>
      </div>

      <div class="record">
        <button id="record-button" class="btn-primary" type="button">I did it today</button>
        <p id="done-note" class="done-note hidden">Done for today — see you tomorrow 💪</p>
        <p id="record-status" class="status"></p>
      </div>

      <div class="panel">
        <div class="stat">
          <span class="label">Your streak</span>
          <span id="user-streak" class="value">0</span>
        </div>
        <div class="stat">
          <span class="label">Active today</span>
          <span id="active-today" class="value">0</span>
        </div>
        <div class="stat">
          <span class="label">Longest streak</span>
          <span id="longest-streak" class="value">0</span>
        </div>
        <div class="stat">
          <span class="label">Streak holder</span>
          <span id="streak-holder" class="value">-</span>
        </div>
      </div>

      <div class="grid-card">
        <div id="habit-grid" class="grid"></div>
      </div>
    </section>
  </main>

  <script>
    const setupEl = document.getElementById('user-setup');
    const mainEl = document.getElementById('main-app');
    const usernameInput = document.getElementById('username');
    const usernameError = document.getElementById('username-error');
    const recordButton = document.getElementById('record-button');
    const doneNote = document.getElementById('done-note');
    const recordStatus = document.getElementById('record-status');
    const gridEl = document.getElementById('habit-grid');

    const STORAGE_KEY = 'habitGridUser';
    const PENDING_KEY = 'pendingCompletions';

    let userId = null;
    let username = null;

    const setStatus = (message, type) => {
      recordStatus.textContent = message;
      recordStatus.dataset.type = type || '';
    };

    const loadStoredUser = () => {
      try {
        const stored = JSON.parse(localStorage.getItem(STORAGE_KEY) || 'null');
        if (stored && stored.userId && stored.username) {
          userId = stored.userId;
          username = stored.username;
          return true;
        }
      } catch (err) {
        localStorage.removeItem(STORAGE_KEY);
      }
      return false;
    };

    const showError = (message) => {
      usernameError.textContent = message;
      usernameInput.classList.add('error');
    };

    const saveUsername = async () => {
      const value = usernameInput.value.trim();
      usernameError.textContent = '';
      usernameInput.classList.remove('error');
      if (!value) {
        showError('Please enter a name');
        return;
      }

      const check = await fetch('/api/check-username', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ username: value })
      });
      if (check.ok) {
        const { available } = await check.json();
        if (!available) {
          showError('That name is already taken');
          return;
        }
      }

      const res = await fetch('/api/save-user', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ username: value })
      });
      if (res.status === 409) {
        showError('That name is already taken');
        return;
      }
      if (!res.ok) {
        showError('Could not save your name, try again');
        return;
      }

      const saved = await res.json();
      userId = saved.userId;
      username = saved.username;
      localStorage.setItem(STORAGE_KEY, JSON.stringify({ userId, username }));
      enterApp();
    };

    const recordToday = async () => {
      try {
        const res = await fetch('/api/record', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ userId })
        });
        if (!res.ok) {
          throw new Error(await res.text() || 'Request failed');
        }
        setStatus('Saved', '');
        await loadGrid();
      } catch (err) {
        const pending = JSON.parse(localStorage.getItem(PENDING_KEY) || '[]');
        pending.push({ date: document.getElementById('today-label').textContent });
        localStorage.setItem(PENDING_KEY, JSON.stringify(pending));
        setStatus("Couldn't reach the server — saved locally, will retry.", 'error');
      }
    };

    const syncPending = async () => {
      const pending = JSON.parse(localStorage.getItem(PENDING_KEY) || '[]');
      if (!pending.length) return;
      const remaining = [];
      for (const entry of pending) {
        try {
          const res = await fetch('/api/record', {
            method: 'POST',
            headers: { 'content-type': 'application/json' },
            body: JSON.stringify({ userId, date: entry.date })
          });
          if (!res.ok && res.status !== 400) remaining.push(entry);
        } catch (err) {
          remaining.push(entry);
        }
      }
      localStorage.setItem(PENDING_KEY, JSON.stringify(remaining));
    };

    const renderStats = (grid) => {
      const stats = grid.stats;
      document.getElementById('user-streak').textContent = stats.userStreaks?.[userId] ?? 0;
      document.getElementById('active-today').textContent = stats.activeToday;
      document.getElementById('longest-streak').textContent = stats.longestStreak;
      document.getElementById('streak-holder').textContent = stats.streakHolder || '-';
    };

    const renderGrid = (grid) => {
      // Current user first, then by name; display order only
      const rows = [...grid.users].sort((a, b) => {
        if (a.userId === userId) return -1;
        if (b.userId === userId) return 1;
        return a.username.localeCompare(b.username);
      });

      gridEl.innerHTML = '';
      gridEl.style.gridTemplateColumns =
        `minmax(110px, auto) minmax(70px, auto) repeat(${grid.days.length}, 1fr)`;

      const corner = document.createElement('div');
      corner.className = 'grid-cell corner-header';
      corner.textContent = `Users (${rows.length})`;
      gridEl.appendChild(corner);

      const streakHeader = document.createElement('div');
      streakHeader.className = 'grid-cell corner-header';
      streakHeader.textContent = 'Streak';
      gridEl.appendChild(streakHeader);

      grid.days.forEach((date) => {
        const cell = document.createElement('div');
        cell.className = 'grid-cell date-header';
        const [, month, day] = date.split('-');
        cell.textContent = `${Number(month)}/${Number(day)}`;
        if (date === grid.referenceDay) cell.classList.add('today');
        const dow = document.createElement('span');
        dow.className = 'day-of-week';
        dow.textContent = new Date(`${date}T00:00:00`).toLocaleDateString('en-US', { weekday: 'short' });
        cell.appendChild(dow);
        gridEl.appendChild(cell);
      });

      rows.forEach((row) => {
        const name = document.createElement('div');
        name.className = 'grid-cell user-name';
        if (row.userId === userId) name.classList.add('current-user');
        name.textContent = row.username;
        gridEl.appendChild(name);

        const streak = document.createElement('div');
        streak.className = 'grid-cell streak-cell';
        streak.textContent = row.currentStreak > 0 ? `${row.currentStreak}🔥` : '0';
        gridEl.appendChild(streak);

        row.completed.forEach((done, index) => {
          const cell = document.createElement('div');
          cell.className = 'grid-cell';
          if (done) {
            cell.classList.add('done');
            cell.textContent = '✓';
          }
          if (grid.days[index] === grid.referenceDay) cell.classList.add('today');
          gridEl.appendChild(cell);
        });
      });
    };

    const loadGrid = async () => {
      const res = await fetch('/api/grid');
      if (!res.ok) {
        setStatus('Failed to load the board', 'error');
        return;
      }
      const grid = await res.json();

      const me = grid.users.find((row) => row.userId === userId);
      if (!me) {
        // removed by the inactivity sweep; start over
        localStorage.removeItem(STORAGE_KEY);
        mainEl.classList.add('hidden');
        setupEl.classList.remove('hidden');
        showError('Your name expired after inactivity — pick one to rejoin');
        return;
      }

      const doneToday = me.completed[0] === true;
      recordButton.classList.toggle('hidden', doneToday);
      doneNote.classList.toggle('hidden', !doneToday);

      renderStats(grid);
      renderGrid(grid);
    };

    const enterApp = () => {
      setupEl.classList.add('hidden');
      mainEl.classList.remove('hidden');
      document.getElementById('current-username').textContent = username;
      syncPending().then(loadGrid).catch(() => loadGrid());
    };

    document.getElementById('save-username').addEventListener('click', () => {
      saveUsername().catch(() => showError('Something went wrong, try again'));
    });
    recordButton.addEventListener('click', () => recordToday());

    if (loadStoredUser()) {
      enterApp();
    } else {
      setupEl.classList.remove('hidden');
    }
  </script>
</body>
</html>
"#;
