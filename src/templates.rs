use tera::Tera;

/// Builds the page registry. Template sources are compiled into the binary,
/// so a bad template fails at startup rather than on first render.
pub fn build() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("login.html", include_str!("../templates/login.html")),
        ("dashboard.html", include_str!("../templates/dashboard.html")),
        ("add_course.html", include_str!("../templates/add_course.html")),
        (
            "add_assignment.html",
            include_str!("../templates/add_assignment.html"),
        ),
        ("help.html", include_str!("../templates/help.html")),
    ])?;
    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::build;

    #[test]
    fn all_pages_register() {
        let tera = build().expect("templates should parse");
        for name in [
            "login.html",
            "dashboard.html",
            "add_course.html",
            "add_assignment.html",
            "help.html",
        ] {
            assert!(
                tera.get_template_names().any(|n| n == name),
                "missing template {}",
                name
            );
        }
    }
}
