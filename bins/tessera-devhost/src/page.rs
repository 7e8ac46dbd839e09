// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The passive host page.

const TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{title}}</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
    .hidden { display: none; }
    .card { border: 1px solid #ddd; border-radius: .5rem; padding: 1rem; margin: 1rem 0; }
    #error-display { background: #fee; border: 1px solid #c33; border-radius: .5rem; padding: .75rem 1rem; }
    #notification-container { position: fixed; top: 1rem; right: 1rem; display: grid; gap: .5rem; }
    .toast { border-radius: .5rem; padding: .5rem .75rem; background: #eef; min-width: 16rem; }
    .toast-warn { background: #ffd; }
    .toast-error { background: #fdd; }
    .toast-title { font-weight: 600; margin: 0; }
    .toast-body { margin: .25rem 0 0; }
    .sr-only { position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0 0 0 0); }
    table { border-collapse: collapse; width: 100%; }
    th, td { text-align: left; padding: .25rem .5rem; }
    .bg-gray-50 { background: #f7f7f7; }
  </style>
</head>
<body>
  <div id="loading">Loading…</div>
  <div id="error-display" class="hidden" role="alert">
    <p id="error-message"></p>
    <button id="close-error" type="button">Dismiss</button>
  </div>
  <div id="app-content" style="display: none"></div>
  <div id="notification-container"></div>
  <div id="live-region" class="sr-only" aria-live="polite"></div>
  <script type="module">
    import init, { launch } from "/pkg/tessera_web.js";
    await init();
    window.tessera = launch();
  </script>
</body>
</html>
"#;

/// Host page titled `title`.
pub(crate) fn host_page(title: &str) -> String {
    TEMPLATE.replace("{{title}}", &html_escape::encode_quoted_attribute(title))
}
