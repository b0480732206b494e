use std::fs;
use std::path::Path;

pub fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// A small site: home, about, contact, and a docs section two levels deep.
pub fn write_site(content: &Path) {
    write(
        content,
        "index.md",
        "---\ntitle: Homepage\norder: 1\nmenuOrder: 1\n---\n# Welcome\n",
    );
    write(
        content,
        "about.md",
        "---\ntitle: About\norder: 2\nmenuOrder: 2\n---\nAbout us.\n",
    );
    write(
        content,
        "contact/index.md",
        "---\ntitle: Contact\norder: 3\n---\nWrite to us.\n",
    );
    write(content, "docs/index.md", "---\ntitle: Docs\norder: 4\n---\n");
    write(
        content,
        "docs/guide/setup.md",
        "---\ntitle: Setup\norder: 5\ntags: [install]\n---\nRun it.\n",
    );
    write(content, "docs/logo.png", "not really a png");
    write(content, "node_modules/pkg/readme.md", "ignored");
}
