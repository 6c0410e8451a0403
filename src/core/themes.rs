// src/core/themes.rs
//! Static style descriptors, one per theme.
//!
//! A theme only contributes CSS, labels and an optional script. Page
//! structure lives in the shared templates under `templates/`.

/// How the header block is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroLayout {
    Centered,
    Left,
}

impl HeroLayout {
    pub fn class(&self) -> &'static str {
        match self {
            HeroLayout::Centered => "hero hero-centered",
            HeroLayout::Left => "hero hero-left",
        }
    }
}

/// Wording of the email and website links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactLabels {
    /// "📧 Email", "🌐 Website"
    Icon,
    /// The address itself.
    Address,
    /// "EMAIL", "WEBSITE"
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct ThemeStyle {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    /// `:root` block defining the custom properties used by [`BASE_CSS`].
    pub palette: &'static str,
    pub extra_css: &'static str,
    pub hero: HeroLayout,
    pub contact_labels: ContactLabels,
    /// Already-escaped markup placed before every section title.
    pub section_prefix: &'static str,
    pub body_class: &'static str,
    /// Static markup placed before the page container (e.g. a canvas).
    pub decoration: Option<&'static str>,
    pub script: Option<&'static str>,
}

impl ThemeStyle {
    pub fn is_animated(&self) -> bool {
        self.script.is_some()
    }
}

pub const BASE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:var(--font);background:var(--bg);color:var(--text);line-height:1.6;min-height:100vh;padding:2rem}
.container{max-width:var(--width);margin:0 auto;background:var(--surface);border-radius:var(--radius);padding:3rem;position:relative;z-index:1}
.hero{padding:2rem 0 2.5rem;margin-bottom:2rem;border-bottom:1px solid var(--border)}
.hero-centered{text-align:center}
h1{font-size:3rem;font-weight:800;color:var(--heading);margin-bottom:0.5rem}
.hero .title{font-size:1.2rem;color:var(--accent-2);margin-bottom:1rem}
.hero .bio{color:var(--text);max-width:720px;line-height:1.8;margin:1rem 0;white-space:pre-wrap}
.hero-centered .bio{margin:1rem auto}
.contact{display:flex;flex-wrap:wrap;gap:0.75rem;margin-top:1.5rem}
.hero-centered .contact{justify-content:center}
.contact a{color:var(--accent);text-decoration:none;padding:0.4rem 1rem;border:1px solid var(--accent);border-radius:999px;transition:all 0.3s}
.contact a:hover{background:var(--accent);color:var(--bg)}
section{margin:2.5rem 0}
.section-title{font-size:1.7rem;color:var(--heading);margin-bottom:1.25rem;padding-bottom:0.5rem;border-bottom:2px solid var(--accent)}
h3{font-size:1.15rem;color:var(--heading);margin-bottom:0.3rem}
.subtitle{color:var(--accent-2);font-weight:600}
.date{color:var(--muted);font-size:0.9rem;font-style:italic}
.description{color:var(--text);margin-top:0.5rem;white-space:pre-wrap}
.timeline{position:relative;padding-left:2rem}
.timeline::before{content:"";position:absolute;left:0.45rem;top:0;bottom:0;width:2px;background:var(--accent)}
.timeline-item{position:relative;margin-bottom:2rem}
.timeline-marker{position:absolute;left:-1.95rem;top:0.35rem;width:0.9rem;height:0.9rem;border-radius:50%;background:var(--accent);border:2px solid var(--surface)}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:1.5rem}
.card{background:var(--card);padding:1.5rem;border-radius:var(--radius);border-left:4px solid var(--accent);transition:transform 0.3s,box-shadow 0.3s}
.card:hover{transform:translateY(-4px);box-shadow:0 10px 30px rgba(0,0,0,0.15)}
.tags{display:flex;flex-wrap:wrap;gap:0.4rem;margin-top:0.75rem}
.tag{background:var(--accent);color:var(--bg);padding:0.15rem 0.7rem;border-radius:999px;font-size:0.8rem}
.item-link{display:inline-block;margin-top:0.5rem;color:var(--accent);text-decoration:none;font-weight:600}
.text-content p{margin-bottom:1rem;color:var(--text);white-space:pre-wrap}
@media(max-width:640px){body{padding:0.75rem}.container{padding:1.5rem}h1{font-size:2.2rem}}
"#;

const ACADEMIC_LIGHT: ThemeStyle = ThemeStyle {
    id: "academic-light",
    display_name: "Academic Light",
    description: "Serif typography on a white page, classic academic layout",
    palette: ":root{--font:Georgia,'Times New Roman',serif;--bg:#fafafa;--surface:#ffffff;--card:#f7f9fb;--text:#444444;--heading:#2c3e50;--muted:#7f8c8d;--accent:#3498db;--accent-2:#7f8c8d;--border:#e0e0e0;--radius:4px;--width:820px}",
    extra_css: ".container{box-shadow:0 2px 10px rgba(0,0,0,0.1)}h1{font-weight:600;font-size:2.5rem}.section-title{border-bottom-width:1px;border-bottom-color:#bdc3c7}.contact a{border:none;padding:0}",
    hero: HeroLayout::Left,
    contact_labels: ContactLabels::Address,
    section_prefix: "",
    body_class: "theme-academic-light",
    decoration: None,
    script: None,
};

const ACADEMIC_MINIMAL: ThemeStyle = ThemeStyle {
    id: "academic-minimal",
    display_name: "Academic Minimal",
    description: "Plain white background with restrained, professional typography",
    palette: ":root{--font:'Helvetica Neue',Arial,sans-serif;--bg:#ffffff;--surface:#ffffff;--card:#ffffff;--text:#333333;--heading:#111111;--muted:#888888;--accent:#111111;--accent-2:#555555;--border:#eeeeee;--radius:0;--width:760px}",
    extra_css: "h1{font-weight:300;letter-spacing:-0.02em}.section-title{font-weight:400;text-transform:uppercase;letter-spacing:0.15em;font-size:1rem;border-bottom-width:1px}.card{border-left-width:1px}.timeline::before,.timeline-marker{background:#cccccc}",
    hero: HeroLayout::Left,
    contact_labels: ContactLabels::Address,
    section_prefix: "",
    body_class: "theme-academic-minimal",
    decoration: None,
    script: None,
};

const GRADIENT_PURPLE: ThemeStyle = ThemeStyle {
    id: "gradient-purple",
    display_name: "Gradient Purple",
    description: "Purple gradient backdrop with a frosted glass page and card layout",
    palette: ":root{--font:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;--bg:linear-gradient(135deg,#667eea 0%,#764ba2 100%);--surface:rgba(255,255,255,0.95);--card:linear-gradient(135deg,#f8f9fa 0%,#ffffff 100%);--text:#444444;--heading:#333333;--muted:#999999;--accent:#667eea;--accent-2:#764ba2;--border:#eeeeee;--radius:20px;--width:1200px}",
    extra_css: "body{background-attachment:fixed}.container{box-shadow:0 20px 60px rgba(0,0,0,0.3);backdrop-filter:blur(10px)}h1{background:linear-gradient(135deg,#667eea,#764ba2);-webkit-background-clip:text;background-clip:text;-webkit-text-fill-color:transparent}.card{border-radius:12px}.tag{background:linear-gradient(135deg,#667eea,#764ba2);color:#ffffff}.contact a:hover{color:#ffffff}",
    hero: HeroLayout::Centered,
    contact_labels: ContactLabels::Icon,
    section_prefix: "",
    body_class: "theme-gradient-purple",
    decoration: None,
    script: None,
};

const DARK_MINIMAL: ThemeStyle = ThemeStyle {
    id: "dark-minimal",
    display_name: "Dark Minimal",
    description: "Near-black background with quiet neon accents",
    palette: ":root{--font:'Courier New',monospace;--bg:#0a0a0a;--surface:rgba(20,20,20,0.9);--card:rgba(0,255,65,0.05);--text:#cccccc;--heading:#ffffff;--muted:#888888;--accent:#00ff41;--accent-2:#00d4ff;--border:#333333;--radius:10px;--width:900px}",
    extra_css: "h1{color:#00ff41}.section-title{color:#00d4ff;border-bottom-color:#333333}.card:hover{background:rgba(0,255,65,0.1)}",
    hero: HeroLayout::Left,
    contact_labels: ContactLabels::Icon,
    section_prefix: "",
    body_class: "theme-dark-minimal",
    decoration: None,
    script: None,
};

const DARK_TECH: ThemeStyle = ThemeStyle {
    id: "dark-tech",
    display_name: "Dark Tech",
    description: "Slate background with technology blue highlights, clean and modern",
    palette: ":root{--font:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;--bg:linear-gradient(135deg,#0f172a,#1e293b);--surface:transparent;--card:rgba(255,255,255,0.05);--text:#cbd5e1;--heading:#f8fafc;--muted:#64748b;--accent:#00d4ff;--accent-2:#94a3b8;--border:rgba(255,255,255,0.08);--radius:12px;--width:1000px}",
    extra_css: "body{background-attachment:fixed}h1{font-size:3.5rem;background:linear-gradient(135deg,#667eea,#00d4ff);-webkit-background-clip:text;background-clip:text;-webkit-text-fill-color:transparent}section{padding:2rem;background:rgba(255,255,255,0.05);border-radius:12px;border-left:3px solid #667eea}.section-title{color:#667eea;border-bottom:none}h3{color:#00d4ff}.tag,.contact a:hover{color:#0f172a}",
    hero: HeroLayout::Centered,
    contact_labels: ContactLabels::Icon,
    section_prefix: "",
    body_class: "theme-dark-tech",
    decoration: None,
    script: None,
};

const NEON_CYBER: ThemeStyle = ThemeStyle {
    id: "neon-cyber",
    display_name: "Neon Cyber",
    description: "Black background, neon green and cyberpunk terminal styling",
    palette: ":root{--font:'Courier New',monospace;--bg:#0a0a0a;--surface:rgba(20,20,20,0.9);--card:rgba(0,255,65,0.05);--text:#e0e0e0;--heading:#ffffff;--muted:#888888;--accent:#00ff41;--accent-2:#00d4ff;--border:#333333;--radius:10px;--width:900px}",
    extra_css: ".container{border:1px solid #00ff41;box-shadow:0 0 50px rgba(0,255,65,0.1)}h1{color:#00ff41;text-transform:uppercase;letter-spacing:0.2rem;text-shadow:0 0 10px rgba(0,255,65,0.5)}.section-title{color:#00d4ff;text-transform:uppercase;letter-spacing:0.1rem;border-bottom:none}.contact a{border-radius:5px}.contact a:hover{box-shadow:0 0 20px rgba(0,255,65,0.6)}",
    hero: HeroLayout::Left,
    contact_labels: ContactLabels::Upper,
    section_prefix: "&gt; ",
    body_class: "theme-neon-cyber",
    decoration: None,
    script: None,
};

const AURORA: ThemeStyle = ThemeStyle {
    id: "aurora",
    display_name: "Aurora",
    description: "Animated particle network behind glass panels, sections fade in on scroll",
    palette: ":root{--font:'Inter',-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;--bg:#0b1020;--surface:rgba(15,23,42,0.55);--card:rgba(255,255,255,0.06);--text:#dbe4ff;--heading:#ffffff;--muted:#8b9cc7;--accent:#7c9cff;--accent-2:#5eead4;--border:rgba(255,255,255,0.1);--radius:18px;--width:1100px}",
    extra_css: "#particles-canvas{position:fixed;top:0;left:0;width:100%;height:100%;z-index:0;pointer-events:none}.container{backdrop-filter:blur(14px);border:1px solid rgba(255,255,255,0.1);box-shadow:0 30px 80px rgba(0,0,0,0.45)}h1{background:linear-gradient(120deg,#7c9cff,#5eead4,#c084fc);-webkit-background-clip:text;background-clip:text;-webkit-text-fill-color:transparent}section{opacity:0;transform:translateY(30px);transition:opacity 0.8s ease,transform 0.8s ease}section.visible{opacity:1;transform:none}",
    hero: HeroLayout::Centered,
    contact_labels: ContactLabels::Icon,
    section_prefix: "",
    body_class: "theme-aurora",
    decoration: Some("<canvas id=\"particles-canvas\"></canvas>"),
    script: Some(AURORA_SCRIPT),
};

const AURORA_SCRIPT: &str = r#"
(function () {
  var canvas = document.getElementById('particles-canvas');
  if (canvas && canvas.getContext) {
    var ctx = canvas.getContext('2d');
    var particles = [];
    var resize = function () {
      canvas.width = window.innerWidth;
      canvas.height = window.innerHeight;
    };
    resize();
    window.addEventListener('resize', resize);
    for (var i = 0; i < 80; i++) {
      particles.push({
        x: Math.random() * canvas.width,
        y: Math.random() * canvas.height,
        vx: (Math.random() - 0.5) * 0.6,
        vy: (Math.random() - 0.5) * 0.6,
        r: Math.random() * 2 + 1
      });
    }
    var draw = function () {
      ctx.clearRect(0, 0, canvas.width, canvas.height);
      for (var a = 0; a < particles.length; a++) {
        var p = particles[a];
        p.x += p.vx;
        p.y += p.vy;
        if (p.x < 0 || p.x > canvas.width) p.vx *= -1;
        if (p.y < 0 || p.y > canvas.height) p.vy *= -1;
        ctx.beginPath();
        ctx.arc(p.x, p.y, p.r, 0, Math.PI * 2);
        ctx.fillStyle = 'rgba(124,156,255,0.7)';
        ctx.fill();
        for (var b = a + 1; b < particles.length; b++) {
          var q = particles[b];
          var dist = Math.hypot(p.x - q.x, p.y - q.y);
          if (dist < 120) {
            ctx.beginPath();
            ctx.moveTo(p.x, p.y);
            ctx.lineTo(q.x, q.y);
            ctx.strokeStyle = 'rgba(94,234,212,' + (0.2 * (1 - dist / 120)) + ')';
            ctx.stroke();
          }
        }
      }
      window.requestAnimationFrame(draw);
    };
    draw();
  }

  var sections = document.querySelectorAll('section');
  if ('IntersectionObserver' in window) {
    var observer = new IntersectionObserver(function (entries) {
      entries.forEach(function (entry) {
        if (entry.isIntersecting) {
          entry.target.classList.add('visible');
          observer.unobserve(entry.target);
        }
      });
    }, { threshold: 0.1 });
    sections.forEach(function (s) { observer.observe(s); });
  } else {
    sections.forEach(function (s) { s.classList.add('visible'); });
  }
})();
"#;

/// Registry order. The first entry is the default theme.
pub static THEMES: [ThemeStyle; 7] = [
    ACADEMIC_LIGHT,
    ACADEMIC_MINIMAL,
    GRADIENT_PURPLE,
    DARK_MINIMAL,
    DARK_TECH,
    NEON_CYBER,
    AURORA,
];
