//! Helpers for the external file links attached to events.

const DRIVE_MARKER: &str = "/file/d/";

/// Trim every link and drop the blank ones.
pub fn tidy(links: Vec<String>) -> Vec<String> {
  links
    .into_iter()
    .map(|l| l.trim().to_owned())
    .filter(|l| !l.is_empty())
    .collect()
}

/// The file id of a Google Drive sharing link (`.../file/d/<id>/...`).
pub fn drive_file_id(link: &str) -> Option<&str> {
  let start = link.find(DRIVE_MARKER)? + DRIVE_MARKER.len();
  let rest = &link[start..];
  let id = &rest[..rest.find('/')?];
  (!id.is_empty()).then_some(id)
}

/// An embeddable preview URL, for Drive links only.
pub fn preview_url(link: &str) -> Option<String> {
  drive_file_id(link).map(|id| format!("https://drive.google.com/file/d/{id}/preview"))
}

/// A direct download URL for Drive links; other links are returned as-is.
pub fn download_url(link: &str) -> String {
  let link = link.trim();
  match drive_file_id(link) {
    Some(id) => format!("https://drive.google.com/uc?export=download&id={id}"),
    None => link.to_owned(),
  }
}
