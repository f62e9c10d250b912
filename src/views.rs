//! Server-built HTML pages.

use crate::models::{Task, TaskStats, User};

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

fn task_item(task: &Task) -> String {
    if task.completed {
        format!(
            r#"<li id="task-{id}" class="completed"><s>{title}</s></li>"#,
            id = task.id,
            title = escape_html(&task.title)
        )
    } else {
        format!(
            r#"<li id="task-{id}"><span>{title}</span> <button type="button" onclick="completeTask({id})">Complete</button></li>"#,
            id = task.id,
            title = escape_html(&task.title)
        )
    }
}

// Posts the add form and complete buttons in the background, then refreshes the counts.
const INDEX_SCRIPT: &str = r#"<script>
async function refreshStats() {
  const res = await fetch('/task-stats');
  if (!res.ok) return;
  const stats = await res.json();
  document.getElementById('completed-count').textContent = stats.completed_count;
  document.getElementById('ongoing-count').textContent = stats.ongoing_count;
}
async function completeTask(id) {
  const res = await fetch('/complete/' + id, { method: 'POST' });
  if (res.status === 204) {
    const item = document.getElementById('task-' + id);
    if (item) {
      item.className = 'completed';
      const button = item.querySelector('button');
      if (button) button.remove();
    }
    refreshStats();
  }
}
document.getElementById('task-form').addEventListener('submit', async (event) => {
  event.preventDefault();
  const form = event.target;
  const res = await fetch('/', { method: 'POST', body: new URLSearchParams(new FormData(form)) });
  if (!res.ok) return;
  const task = await res.json();
  const item = document.createElement('li');
  item.id = 'task-' + task.id;
  const title = document.createElement('span');
  title.textContent = task.title;
  const button = document.createElement('button');
  button.type = 'button';
  button.textContent = 'Complete';
  button.onclick = () => completeTask(task.id);
  item.append(title, ' ', button);
  document.getElementById('tasks').append(item);
  form.reset();
  refreshStats();
});
</script>"#;

/// The task list with this week's counts.
pub fn index_page(user: &User, tasks: &[Task], stats: TaskStats) -> String {
    let items: String = tasks.iter().map(task_item).collect::<Vec<_>>().join("\n");
    let body = format!(
        r#"<header>
<p>Signed in as <strong>{username}</strong></p>
<form method="post" action="/logout"><button type="submit">Log out</button></form>
</header>
<h1>Tasks</h1>
<section id="stats">
<p>Completed this week: <span id="completed-count">{completed}</span></p>
<p>Ongoing this week: <span id="ongoing-count">{ongoing}</span></p>
</section>
<form id="task-form" method="post" action="/">
<input type="text" name="title" placeholder="New task">
<button type="submit">Add</button>
</form>
<ul id="tasks">
{items}
</ul>
{script}"#,
        username = escape_html(&user.username),
        completed = stats.completed_count,
        ongoing = stats.ongoing_count,
        items = items,
        script = INDEX_SCRIPT
    );
    layout("Tasks", &body)
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">{submit}</button>
</form>"#,
        action = action,
        submit = submit
    )
}

pub fn login_page(error: Option<&str>) -> String {
    let error = error
        .map(|msg| format!(r#"<p class="error">{}</p>"#, escape_html(msg)))
        .unwrap_or_default();
    let body = format!(
        "<h1>Log in</h1>\n{}\n{}\n<p>No account? <a href=\"/register\">Register</a></p>",
        error,
        credentials_form("/login", "Log in")
    );
    layout("Log in", &body)
}

pub fn register_page() -> String {
    let body = format!(
        "<h1>Register</h1>\n{}\n<p>Already registered? <a href=\"/login\">Log in</a></p>",
        credentials_form("/register", "Register")
    );
    layout("Register", &body)
}
