/*! Desktop icon discovery through Finder's accessibility tree. */

use std::collections::{BTreeSet, HashSet};

use crate::platform::PlatformHandle;

/// How deep below the application element the walk descends.
pub const MAX_DEPTH: usize = 8;

/// Roles Finder uses for desktop items across OS versions.
pub const ICON_ROLES: [&str; 4] = ["AXGroup", "AXImage", "AXButton", "AXListItem"];

fn mentions_icon(value: Option<String>) -> bool {
  value.is_some_and(|v| v.to_lowercase().contains("icon"))
}

/// Title of `element` when it looks like a desktop icon.
fn icon_title<H: PlatformHandle>(element: &H) -> Option<String> {
  let looks_like_icon = mentions_icon(element.role_description())
    || mentions_icon(element.subrole())
    || element
      .role()
      .is_some_and(|role| ICON_ROLES.contains(&role.as_str()));
  if !looks_like_icon {
    return None;
  }
  element.title().filter(|title| !title.is_empty())
}

/// Children to descend into: visible children when the element reports any,
/// otherwise all children.
fn descend<H: PlatformHandle>(element: &H) -> Vec<H> {
  let visible = element.visible_children();
  if visible.is_empty() {
    element.children()
  } else {
    visible
  }
}

/// Collect `(title, element)` pairs for icon-like elements below `root`, in
/// depth-first order. Titles are unique (first occurrence wins).
///
/// With `known` set, the walk stops once every known name has been found.
/// Unknown icons are still collected but do not count toward that.
pub fn find_icon_elements<H: PlatformHandle>(
  root: &H,
  known: Option<&BTreeSet<String>>,
) -> Vec<(String, H)> {
  let mut found = Vec::new();
  let mut seen = HashSet::new();
  let mut known_found = 0;
  let mut stack: Vec<(H, usize)> = descend(root).into_iter().rev().map(|c| (c, 1)).collect();

  while let Some((element, depth)) = stack.pop() {
    if known.is_some_and(|known| !known.is_empty() && known_found >= known.len()) {
      break;
    }
    if let Some(title) = icon_title(&element) {
      if seen.insert(title.clone()) {
        if known.is_some_and(|known| known.contains(&title)) {
          known_found += 1;
        }
        found.push((title, element.clone()));
      }
    }
    if depth < MAX_DEPTH {
      stack.extend(descend(&element).into_iter().rev().map(|c| (c, depth + 1)));
    }
  }

  log::trace!("Accessibility walk found {} icon elements", found.len());
  found
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::fake::FakeElement;

  fn icon(title: &str) -> FakeElement {
    FakeElement::builder(1).role("AXImage").title(title).build()
  }

  /// `depth` nested groups with an icon at the bottom.
  fn chain(depth: usize, leaf: FakeElement) -> FakeElement {
    (0..depth).fold(leaf, |inner, _| {
      FakeElement::builder(1).role("AXScrollArea").child(inner).build()
    })
  }

  #[test]
  fn matches_roles_subroles_and_descriptions() {
    let root = FakeElement::builder(1)
      .child(icon("image"))
      .child(FakeElement::builder(1).role("AXCell").subrole("AXDesktopIcon").title("sub").build())
      .child(
        FakeElement::builder(1)
          .role("AXUnknown")
          .role_description("Icon")
          .title("desc")
          .build(),
      )
      .child(FakeElement::builder(1).role("AXStaticText").title("label").build())
      .build();
    let titles: Vec<String> = find_icon_elements(&root, None).into_iter().map(|(t, _)| t).collect();
    assert_eq!(titles, vec!["image", "sub", "desc"]);
  }

  #[test]
  fn skips_untitled_elements() {
    let root = FakeElement::builder(1)
      .child(FakeElement::builder(1).role("AXGroup").build())
      .build();
    assert!(find_icon_elements(&root, None).is_empty());
  }

  #[test]
  fn prefers_visible_children() {
    let root = FakeElement::builder(1)
      .visible_child(icon("visible"))
      .child(icon("hidden"))
      .build();
    let found = find_icon_elements(&root, None);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].0, "visible");
  }

  #[test]
  fn respects_depth_limit() {
    let reachable = FakeElement::builder(1).child(chain(MAX_DEPTH - 1, icon("deep"))).build();
    assert_eq!(find_icon_elements(&reachable, None).len(), 1);

    let too_deep = FakeElement::builder(1).child(chain(MAX_DEPTH, icon("deeper"))).build();
    assert!(find_icon_elements(&too_deep, None).is_empty());
  }

  fn known(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(ToString::to_string).collect()
  }

  #[test]
  fn stops_once_every_known_name_is_found() {
    let root = FakeElement::builder(1)
      .child(icon("a"))
      .child(icon("b"))
      .child(icon("c"))
      .build();
    let titles: Vec<String> = find_icon_elements(&root, Some(&known(&["a", "b"])))
      .into_iter()
      .map(|(t, _)| t)
      .collect();
    assert_eq!(titles, vec!["a", "b"]);
  }

  #[test]
  fn unknown_icons_do_not_end_the_walk() {
    let root = FakeElement::builder(1)
      .child(icon("Macintosh HD"))
      .child(icon("todo.txt"))
      .build();
    let titles: Vec<String> = find_icon_elements(&root, Some(&known(&["todo.txt"])))
      .into_iter()
      .map(|(t, _)| t)
      .collect();
    assert_eq!(titles, vec!["Macintosh HD", "todo.txt"]);
  }

  #[test]
  fn duplicate_titles_keep_first() {
    let first = icon("same");
    let root = FakeElement::builder(1).child(first.clone()).child(icon("same")).build();
    let found = find_icon_elements(&root, None);
    assert_eq!(found.len(), 1);
    assert!(found[0].1.same_as(&first));
  }
}
