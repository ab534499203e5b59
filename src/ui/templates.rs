//! HTML templates for the web UI

use minijinja::Environment;
use serde::Serialize;

use crate::error::Result;

const BASE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{% block title %}{% endblock %} - Blogpad</title>
</head>
<body>
  <nav>
    <h1><a href="/">Blogpad</a></h1>
    <ul>
      {% if user %}
        <li><span>{{ user.username }}</span></li>
        <li><a href="/auth/logout">Log Out</a></li>
      {% else %}
        <li><a href="/auth/register">Register</a></li>
        <li><a href="/auth/login">Log In</a></li>
      {% endif %}
    </ul>
  </nav>
  <section class="content">
    <header>{% block header %}{% endblock %}</header>
    {% if error %}<div class="flash">{{ error }}</div>{% endif %}
    {% block content %}{% endblock %}
  </section>
</body>
</html>
"#;

const REGISTER: &str = r#"{% extends "base.html" %}
{% block header %}<h1>{% block title %}Register{% endblock %}</h1>{% endblock %}
{% block content %}
  <form method="post">
    <label for="username">Username</label>
    <input name="username" id="username" value="{{ username }}" required>
    <label for="password">Password</label>
    <input type="password" name="password" id="password" required>
    <input type="submit" value="Register">
  </form>
{% endblock %}
"#;

const LOGIN: &str = r#"{% extends "base.html" %}
{% block header %}<h1>{% block title %}Log In{% endblock %}</h1>{% endblock %}
{% block content %}
  <form method="post">
    <label for="username">Username</label>
    <input name="username" id="username" value="{{ username }}" required>
    <label for="password">Password</label>
    <input type="password" name="password" id="password" required>
    <input type="submit" value="Log In">
  </form>
{% endblock %}
"#;

const INDEX: &str = r#"{% extends "base.html" %}
{% block header %}
  <h1>{% block title %}Posts{% endblock %}</h1>
  {% if user %}<a class="action" href="/create">New</a>{% endif %}
{% endblock %}
{% block content %}
  {% for post in posts %}
    <article class="post">
      <header>
        <div>
          <h1>{{ post.title }}</h1>
          <div class="about">by {{ post.username }} on {{ post.created[:10] }}</div>
        </div>
        {% if user and user.id == post.author_id %}
          <a class="action" href="/{{ post.id }}/update">Edit</a>
        {% endif %}
      </header>
      <p class="body">{{ post.body }}</p>
    </article>
    {% if not loop.last %}<hr>{% endif %}
  {% else %}
    <p>No posts yet.</p>
  {% endfor %}
{% endblock %}
"#;

const CREATE: &str = r#"{% extends "base.html" %}
{% block header %}<h1>{% block title %}New Post{% endblock %}</h1>{% endblock %}
{% block content %}
  <form method="post">
    <label for="title">Title</label>
    <input name="title" id="title" value="{{ form.title }}" required>
    <label for="body">Body</label>
    <textarea name="body" id="body">{{ form.body }}</textarea>
    <input type="submit" value="Save">
  </form>
{% endblock %}
"#;

const UPDATE: &str = r#"{% extends "base.html" %}
{% block header %}<h1>{% block title %}Edit "{{ post.title }}"{% endblock %}</h1>{% endblock %}
{% block content %}
  <form method="post">
    <label for="title">Title</label>
    <input name="title" id="title" value="{{ form.title }}" required>
    <label for="body">Body</label>
    <textarea name="body" id="body">{{ form.body }}</textarea>
    <input type="submit" value="Save">
  </form>
  <hr>
  <form action="/{{ post.id }}/delete" method="post">
    <input class="danger" type="submit" value="Delete" onclick="return confirm('Are you sure?');">
  </form>
{% endblock %}
"#;

/// Compiled page templates
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("base.html", BASE)?;
        env.add_template("auth/register.html", REGISTER)?;
        env.add_template("auth/login.html", LOGIN)?;
        env.add_template("blog/index.html", INDEX)?;
        env.add_template("blog/create.html", CREATE)?;
        env.add_template("blog/update.html", UPDATE)?;
        Ok(Self { env })
    }

    /// Render a named template with the given context
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}
