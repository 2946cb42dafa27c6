//! Library card icons, chosen by code-name prefix.

const ICONS: &[(&str, &str)] = &[
    (
        "IBC",
        r#"<svg class="w-6 h-6 text-[#24305E]" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
  <rect x="4" y="2" width="16" height="20" rx="2" ry="2"></rect>
  <path d="M9 22v-4h6v4"></path>
  <path d="M8 6h.01"></path>
  <path d="M16 6h.01"></path>
  <path d="M12 6h.01"></path>
  <path d="M12 10h.01"></path>
  <path d="M12 14h.01"></path>
  <path d="M16 10h.01"></path>
  <path d="M16 14h.01"></path>
  <path d="M8 10h.01"></path>
  <path d="M8 14h.01"></path>
</svg>"#,
    ),
    (
        "NFPA 13",
        r#"<svg class="w-6 h-6 text-[#24305E]" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
  <path d="M7 16.3c2.2 0 4-1.83 4-4.05 0-1.16-.57-2.26-1.71-3.19S7.29 6.75 7 5.3c-.29 1.45-1.14 2.84-2.29 3.76S3 11.1 3 12.25c0 2.22 1.8 4.05 4 4.05z"></path>
  <path d="M12.56 6.6A10.97 10.97 0 0 0 14 3.02c.5 2.5 2 4.9 4 6.5s3 3.5 3 5.5a6.98 6.98 0 0 1-11.91 4.97"></path>
</svg>"#,
    ),
    (
        "NFPA 14",
        r#"<svg class="w-6 h-6 text-[#24305E]" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
  <path d="m2 22 1-1h3l9-9"></path>
  <path d="M3 21v-3l9-9"></path>
  <path d="m15 6 3.4-3.4a2.1 2.1 0 1 1 3 3L18 9l.4.4a2.1 2.1 0 1 1-3 3l-3.8-3.8a2.1 2.1 0 1 1 3-3l.4.4Z"></path>
</svg>"#,
    ),
    (
        "NFPA 20",
        r#"<svg class="w-6 h-6 text-[#24305E]" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
  <path d="m12 14 4-4"></path>
  <path d="M3.34 19a10 10 0 1 1 17.32 0"></path>
</svg>"#,
    ),
    (
        "NFPA 72",
        r#"<svg class="w-6 h-6 text-[#24305E]" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
  <path d="M6 8a6 6 0 0112 0c0 7 3 9 3 9H3s3-2 3-9"></path>
  <path d="M10.3 21a1.94 1.94 0 0 0 3.4 0"></path>
</svg>"#,
    ),
    (
        "ADA",
        r#"<svg class="w-6 h-6 text-[#24305E]" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
  <circle cx="16" cy="4" r="1"></circle>
  <path d="m18 19 1-7-6 1"></path>
  <path d="M5 8 3-3 5.5 3-2.36 3.5"></path>
  <path d="M4.24 14.5a5 5 0 0 0 6.88 6"></path>
  <path d="M13.76 17.5a5 5 0 0 0-6.88-6"></path>
</svg>"#,
    ),
    (
        "IMC",
        r#"<svg class="w-6 h-6 text-[#24305E]" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
  <path d="M17.7 7.7a2.5 2.5 0 1 1 1.8 4.3H2"></path>
  <path d="M9.6 4.6A2 2 0 1 1 11 8H2"></path>
  <path d="M12.6 19.4A2 2 0 1 0 14 16H2"></path>
</svg>"#,
    ),
    (
        "IPC",
        r#"<svg class="w-6 h-6 text-[#24305E]" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
  <path d="M12 2.69l5.66 5.66a8 8 0 1 1-11.31 0z"></path>
</svg>"#,
    ),
    (
        "NEC",
        r#"<svg class="w-6 h-6 text-[#24305E]" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
  <polygon points="13 2 3 14 12 14 11 22 21 10 12 10 13 2"></polygon>
</svg>"#,
    ),
];

/// Open book, for codes without a dedicated icon.
pub const DEFAULT_ICON: &str = r#"<svg class="w-6 h-6 text-[#24305E]" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24">
  <path stroke-linecap="round" stroke-linejoin="round" d="M12 6.253v13m0-13C10.832 5.477 9.246 5 7.5 5S4.168 5.477 3 6.253v13C4.168 18.477 5.754 18 7.5 18s3.332.477 4.5 1.253m0-13C13.168 5.477 14.754 5 16.5 5c1.747 0 3.332.477 4.5 1.253v13C19.832 18.477 18.247 18 16.5 18c-1.746 0-3.332.477-4.5 1.253"></path>
</svg>"#;

/// Icon for a code name: the first table entry the name starts with.
pub fn icon_for(code_name: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(prefix, _)| code_name.starts_with(prefix))
        .map(|(_, svg)| *svg)
        .unwrap_or(DEFAULT_ICON)
}
