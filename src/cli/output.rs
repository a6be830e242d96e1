//! Console output helpers shared by the command handlers

use crate::comments::CommentTreeNode;

pub fn print_info(message: &str) {
    println!("ℹ️  {message}");
}

pub fn print_success(message: &str) {
    println!("✅ {message}");
}

pub fn print_warning(message: &str) {
    println!("⚠️  {message}");
}

pub fn print_error(message: &str) {
    eprintln!("❌ {message}");
}

/// Section title followed by an underline of matching width
pub fn print_header(title: &str) {
    println!("\n{title}");
    println!("{}", "=".repeat(title.chars().count()));
}

/// Indented rendering of a comment forest, one line per comment
pub fn print_comment_tree(nodes: &[CommentTreeNode]) {
    let mut stack: Vec<(&CommentTreeNode, usize)> = nodes.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        println!(
            "{}#{} (▲{}) {}",
            "  ".repeat(depth),
            node.id,
            node.upvotes,
            truncate(&node.body, 60)
        );
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }
}

/// Cut `text` to at most `max_chars` characters, marking the cut with an ellipsis
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("héllo wörld", 6), "héllo…");
        assert_eq!(truncate("héllo wörld", 6).chars().count(), 6);
    }
}
