//! Symbol range resolver.
//!
//! Workspace symbol search usually answers with a declaration point, not
//! the symbol's full extent. Several operations need the whole body — a
//! function's range should run to its closing brace, not stop at the
//! name. This module upgrades an imprecise location through a tiered
//! heuristic that always produces *some* range:
//!
//! 1. semantic tokens around the declaration line, scored against the
//!    symbol's name, column, and kind;
//! 2. for callable kinds, a brace-balance scan over operator tokens to
//!    find the body's end;
//! 3. the document symbol tree, matched by kind near the declaration line;
//! 4. the original range, untouched.
//!
//! Degradation is silent — a lower tier is observable only as lower
//! precision, and logged at debug level.

use prism_lsp::{ClientError, LanguageClient};
use prism_types::{
    DocumentSymbol, Position, Range, SymbolKind, SymbolMatch, TokenCategory, TokenPosition,
};

/// Lines requested before the declaration line (clamped at zero).
const DECL_WINDOW_BEFORE: u32 = 5;

/// Lines requested after the declaration line for token scoring.
const DECL_WINDOW_AFTER: u32 = 50;

/// Forward window, in lines, for the body brace scan.
const BODY_WINDOW_LINES: u32 = 200;

/// How far a document-symbol entry may sit from the declaration line.
const SYMBOL_TREE_TOLERANCE_LINES: u32 = 5;

const NAME_MATCH_SCORE: i32 = 100;
const PROXIMITY_MAX_SCORE: i32 = 50;
const KIND_MATCH_SCORE: i32 = 75;

/// Refine `symbol`'s range to its full extent.
///
/// Never fails: every tier that errors or finds nothing falls through to
/// the next, and the last tier is the range the search already returned.
pub async fn resolve_symbol_range(client: &dyn LanguageClient, symbol: &SymbolMatch) -> Range {
    let anchor = match declaration_token(client, symbol).await {
        Ok(anchor) => anchor,
        Err(e) => {
            tracing::debug!(
                symbol = %symbol.name,
                error = %e,
                "semantic token lookup failed; trying document symbols"
            );
            None
        }
    };

    if let Some(anchor) = anchor {
        if !symbol.kind.is_callable() {
            return anchor.range;
        }
        match body_range(client, symbol, &anchor).await {
            Ok(Some(range)) => return range,
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(
                    symbol = %symbol.name,
                    error = %e,
                    "body scan failed; trying document symbols"
                );
            }
        }
        // No balanced body found. The symbol tree may still know the full
        // extent; failing that, the anchor token is the best answer.
        return document_symbol_range(client, symbol)
            .await
            .unwrap_or(anchor.range);
    }

    document_symbol_range(client, symbol)
        .await
        .unwrap_or(symbol.location.range)
}

/// Tier 1/2: fetch declaration-category tokens around the declaration line
/// and pick the best-scoring one on that line.
async fn declaration_token(
    client: &dyn LanguageClient,
    symbol: &SymbolMatch,
) -> Result<Option<TokenPosition>, ClientError> {
    let decl = symbol.location.range.start;
    let window = Range::new(
        Position::new(decl.line.saturating_sub(DECL_WINDOW_BEFORE), 0),
        Position::new(decl.line + DECL_WINDOW_AFTER, 0),
    );
    let tokens = client
        .semantic_tokens(&symbol.location.uri, &TokenCategory::DECLARATION, window)
        .await?;
    Ok(best_declaration_token(tokens, symbol))
}

/// Pick the highest-scoring token on the declaration line. Ties keep the
/// first candidate, so the result is deterministic for any token order.
fn best_declaration_token(
    tokens: Vec<TokenPosition>,
    symbol: &SymbolMatch,
) -> Option<TokenPosition> {
    let decl_line = symbol.location.range.start.line;
    let mut best: Option<(i32, TokenPosition)> = None;
    for token in tokens {
        if token.range.start.line != decl_line {
            continue;
        }
        let score = score_token(&token, symbol);
        match &best {
            Some((best_score, _)) if *best_score >= score => {}
            _ => best = Some((score, token)),
        }
    }
    best.map(|(_, token)| token)
}

/// Score one candidate token against the symbol being resolved.
///
/// Name containment dominates; column proximity disambiguates duplicate
/// names on the same line; a category agreeing with a callable kind adds
/// further confidence.
fn score_token(token: &TokenPosition, symbol: &SymbolMatch) -> i32 {
    let decl = symbol.location.range.start;
    let mut score = 0;

    if token.text.contains(&symbol.name) {
        score += NAME_MATCH_SCORE;
    }

    let column_distance = token.range.start.character.abs_diff(decl.character) as i32;
    score += (PROXIMITY_MAX_SCORE - column_distance).max(0);

    if symbol.kind.is_callable()
        && matches!(
            token.category,
            TokenCategory::Method | TokenCategory::Function
        )
    {
        score += KIND_MATCH_SCORE;
    }

    score
}

/// Tier 3: scan operator tokens forward from the anchor for the brace that
/// closes the body.
async fn body_range(
    client: &dyn LanguageClient,
    symbol: &SymbolMatch,
    anchor: &TokenPosition,
) -> Result<Option<Range>, ClientError> {
    let start = anchor.range.start;
    let window = Range::new(
        Position::new(start.line, 0),
        Position::new(start.line + BODY_WINDOW_LINES, 0),
    );
    let tokens = client
        .semantic_tokens(&symbol.location.uri, &TokenCategory::BODY_SCAN, window)
        .await?;
    Ok(balanced_close(tokens, start).map(|end| Range::new(start, end)))
}

/// Find the end of the first brace-balanced region at or after `from`.
///
/// Closing braces seen before any opener belong to an enclosing scope and
/// are ignored. Returns the end position of the token holding the brace
/// that returns the depth to zero, or `None` if the window never balances.
fn balanced_close(mut tokens: Vec<TokenPosition>, from: Position) -> Option<Position> {
    tokens.sort_by_key(|token| token.range.start);

    let mut depth: i32 = 0;
    let mut opened = false;
    for token in tokens {
        if token.range.start < from {
            continue;
        }
        for ch in token.text.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' if opened => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(token.range.end);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

/// Tier 4: ask the document symbol tree for a same-kind entry near the
/// declaration line and reuse its range verbatim.
async fn document_symbol_range(
    client: &dyn LanguageClient,
    symbol: &SymbolMatch,
) -> Option<Range> {
    match client.document_symbols(&symbol.location.uri).await {
        Ok(tree) => {
            nearest_symbol_range(&tree, symbol.kind, symbol.location.range.start.line)
        }
        Err(e) => {
            tracing::debug!(
                symbol = %symbol.name,
                error = %e,
                "document symbol fallback failed; keeping known range"
            );
            None
        }
    }
}

/// Recursively search `nodes` (children included) for the same-kind symbol
/// whose start line is nearest `line`, within the tolerance.
fn nearest_symbol_range(nodes: &[DocumentSymbol], kind: SymbolKind, line: u32) -> Option<Range> {
    fn visit(
        nodes: &[DocumentSymbol],
        kind: SymbolKind,
        line: u32,
        best: &mut Option<(u32, Range)>,
    ) {
        for node in nodes {
            if node.kind == kind {
                let distance = node.range.start.line.abs_diff(line);
                if distance <= SYMBOL_TREE_TOLERANCE_LINES {
                    match best {
                        Some((best_distance, _)) if *best_distance <= distance => {}
                        _ => *best = Some((distance, node.range)),
                    }
                }
            }
            visit(&node.children, kind, line, best);
        }
    }

    let mut best = None;
    visit(nodes, kind, line, &mut best);
    best.map(|(_, range)| range)
}
