//! Embedded HTML/CSS/JS for the bfhl browser form.
//!
//! The entire page is compiled into the binary as a string constant. It holds
//! no state of its own: every interaction goes through the JSON API and the
//! page redraws from the returned view.

/// The complete single-page form.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>BFHL App</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app { max-width: 720px; margin: 0 auto; padding: 24px; }
h1 { font-size: 24px; font-weight: 600; margin-bottom: 16px; }
h2 { font-size: 16px; font-weight: 600; margin: 16px 0 8px; }

textarea {
  width: 100%;
  min-height: 110px;
  padding: 10px;
  background: var(--surface);
  color: var(--text);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  font-family: var(--mono);
  resize: vertical;
}

button.primary {
  width: 100%;
  margin-top: 10px;
  padding: 10px;
  background: var(--accent);
  color: #0d1117;
  border: none;
  border-radius: var(--radius);
  font-weight: 600;
  cursor: pointer;
}
button.primary:disabled { opacity: 0.5; cursor: default; }

.picker {
  margin-top: 16px;
  padding: 12px;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
}
.picker label { display: inline-flex; gap: 6px; margin: 4px 12px 4px 0; cursor: pointer; }

.chips { display: flex; flex-wrap: wrap; gap: 6px; margin-top: 10px; }
.chip {
  display: inline-flex;
  align-items: center;
  gap: 6px;
  padding: 2px 10px;
  border: 1px solid var(--border);
  border-radius: 999px;
  font-size: 12px;
}
.chip button { background: none; border: none; color: var(--text-muted); cursor: pointer; }

pre {
  margin-top: 8px;
  padding: 12px;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  font-family: var(--mono);
  white-space: pre-wrap;
}

.hidden { display: none; }

.banner {
  position: fixed;
  left: 50%;
  bottom: 24px;
  transform: translateX(-50%);
  display: flex;
  gap: 12px;
  align-items: center;
  padding: 10px 16px;
  background: var(--red);
  color: #fff;
  border-radius: var(--radius);
}
.banner button { background: none; border: none; color: #fff; font-size: 16px; cursor: pointer; }
</style>
</head>
<body>
<div class="app">
  <h1>BFHL App</h1>
  <h2>API Input</h2>
  <textarea id="input" placeholder='Enter valid JSON (e.g., {"data": ["A","1","B","2","C","3"]})'></textarea>
  <button id="submit" class="primary">Submit</button>

  <div id="picker" class="picker hidden">
    <div>Select Options</div>
    <div id="options"></div>
    <div id="chips" class="chips"></div>
  </div>

  <div id="output" class="hidden">
    <h2>Filtered Response:</h2>
    <pre id="rendered"></pre>
  </div>
</div>

<div id="banner" class="banner hidden">
  <span id="banner-text"></span>
  <button id="banner-close" title="Close">&times;</button>
</div>

<script>
// ---------------------------------------------------------------------------
// API helpers
// ---------------------------------------------------------------------------
let bannerTimer = null;
let current = null;

async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  return res.json();
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------
function draw(view) {
  if (!view || view.fields === undefined) return;
  current = view;

  const input = document.getElementById('input');
  if (document.activeElement !== input) input.value = view.input;

  const submit = document.getElementById('submit');
  submit.textContent = view.submit_label;
  submit.disabled = view.loading;

  document.getElementById('picker').classList.toggle('hidden', !view.show_filters);
  const options = document.getElementById('options');
  options.innerHTML = '';
  for (const f of view.fields) {
    const label = document.createElement('label');
    const box = document.createElement('input');
    box.type = 'checkbox';
    box.value = f.name;
    box.checked = view.filters.includes(f.name);
    box.addEventListener('change', onFilterToggle);
    label.append(box, f.label);
    options.append(label);
  }

  const chips = document.getElementById('chips');
  chips.innerHTML = '';
  for (const name of view.filters) {
    const chip = document.createElement('span');
    chip.className = 'chip';
    const close = document.createElement('button');
    close.innerHTML = '&times;';
    close.addEventListener('click', () => removeFilter(name));
    chip.append(name, close);
    chips.append(chip);
  }

  document.getElementById('output').classList.toggle('hidden', !view.has_response);
  document.getElementById('rendered').textContent = view.rendered;

  const banner = document.getElementById('banner');
  clearTimeout(bannerTimer);
  if (view.error) {
    document.getElementById('banner-text').textContent = view.error.message;
    banner.classList.remove('hidden');
    bannerTimer = setTimeout(dismissError, view.error.remaining_ms);
  } else {
    banner.classList.add('hidden');
  }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------
async function onSubmit() {
  const submit = document.getElementById('submit');
  submit.disabled = true;
  submit.textContent = 'Submitting...';
  await api('PUT', '/api/input', { input: document.getElementById('input').value });
  draw(await api('POST', '/api/submit'));
}

async function onFilterToggle() {
  // Keep existing tags in pick order, newly checked boxes go last.
  const checked = [...document.querySelectorAll('#options input:checked')].map(b => b.value);
  const kept = current ? current.filters.filter(n => checked.includes(n)) : [];
  const picked = kept.concat(checked.filter(n => !kept.includes(n)));
  draw(await api('PUT', '/api/filters', { filters: picked }));
}

async function removeFilter(name) {
  draw(await api('DELETE', '/api/filters/' + encodeURIComponent(name)));
}

async function dismissError() {
  draw(await api('POST', '/api/error/dismiss'));
}

document.getElementById('submit').addEventListener('click', onSubmit);
document.getElementById('banner-close').addEventListener('click', dismissError);
api('GET', '/api/state').then(draw);
</script>
</body>
</html>
"##;
