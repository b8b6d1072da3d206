//! Placeholder datasets served by the in-memory provider.
//!
//! Deterministic: every call returns the same records in the same order.

use chrono::{DateTime, Duration, Utc};

use crate::entities::{
    AuditAction, AuditLog, AuditOutcome, Comment, CommentStatus, POST_CATEGORIES, Post,
    PostStatus, Role, User, UserStatus,
};
use crate::record::StatusEnum;

/// 2024-01-01T00:00:00Z
const EPOCH_SECS: i64 = 1_704_067_200;

fn at(hours: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(EPOCH_SECS, 0).unwrap_or_default() + Duration::hours(hours)
}

const USERNAMES: &[&str] = &[
    "jane_admin",
    "mod_marcus",
    "alice_w",
    "bob_builder",
    "carol_dev",
    "dave_ops",
    "erin_k",
    "frank_l",
    "grace_h",
    "heidi_m",
    "ivan_p",
    "judy_q",
    "mallory_r",
    "niaj_s",
    "olivia_t",
    "peggy_u",
    "rupert_v",
    "sybil_w",
    "trent_x",
    "victor_y",
    "walter_z",
    "xena_a",
    "yusuf_b",
    "zoe_c",
    "quinn_d",
];

pub fn users() -> Vec<User> {
    USERNAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let role = match i {
                0 => Role::Admin,
                1 | 12 => Role::Moderator,
                _ => Role::Member,
            };
            let status = match i % 7 {
                3 => UserStatus::Banned,
                5 => UserStatus::Pending,
                _ => UserStatus::Active,
            };
            User {
                id: i as u64 + 1,
                username: (*name).to_string(),
                email: format!("{}@agora.dev", name.replace('_', ".")),
                role,
                status,
                joined_at: at(i as i64 * 72),
                post_count: ((i * 7) % 23) as u32,
                version: 1,
            }
        })
        .collect()
}

const POST_TITLES: &[&str] = &[
    "Welcome to Agora",
    "Community guidelines",
    "How do I reset my password?",
    "Show off your desk setup",
    "Weekly off-topic thread",
    "Release notes for March",
    "Markdown tips and tricks",
    "Cannot upload an avatar",
    "My first plugin",
    "Favourite podcasts",
    "Scheduled maintenance",
    "Search is slow on mobile",
    "Pixel art collection",
    "Book club: chapter four",
    "Moderation team update",
    "Dark mode feedback",
    "Building a tiny synth",
    "Weekend hiking photos",
];

/// Post authors skip the first user so comment search for her name stays unambiguous.
fn author(i: usize) -> &'static str {
    USERNAMES[1 + i % (USERNAMES.len() - 1)]
}

pub fn posts() -> Vec<Post> {
    POST_TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let status = match i % 6 {
                2 => PostStatus::Draft,
                4 => PostStatus::Hidden,
                5 => PostStatus::FlaggedForReview,
                _ => PostStatus::Published,
            };
            Post {
                id: i as u64 + 1,
                title: (*title).to_string(),
                author: author(i * 3).to_string(),
                category: POST_CATEGORIES[i % POST_CATEGORIES.len()].to_string(),
                status,
                created_at: at(200 + i as i64 * 30),
                comment_count: (i % 5) as u32,
                content: format!("{title}. Share your thoughts below."),
                version: 1,
            }
        })
        .collect()
}

const COMMENT_BODIES: &[&str] = &[
    "Thanks for posting this!",
    "I had the same problem last week.",
    "Could you share a screenshot?",
    "Great write-up, bookmarked.",
    "BUY CHEAP WATCHES NOW",
    "This should be pinned.",
    "Works for me after clearing the cache.",
    "Not sure this belongs in this category.",
    "Love the colour palette.",
    "Any update on this?",
];

pub fn comments() -> Vec<Comment> {
    let posts = posts();
    let mut comments: Vec<Comment> = (0..36)
        .map(|i| {
            let post = &posts[(i * 5) % posts.len()];
            let body = COMMENT_BODIES[i % COMMENT_BODIES.len()];
            let status = if body.starts_with("BUY") {
                CommentStatus::Spam
            } else {
                match i % 9 {
                    2 => CommentStatus::Hidden,
                    6 => CommentStatus::FlaggedForReview,
                    _ => CommentStatus::Visible,
                }
            };
            Comment {
                id: i as u64 + 1,
                author: author(i * 2 + 1).to_string(),
                post_id: post.id,
                post_title: post.title.clone(),
                content: body.to_string(),
                status,
                created_at: at(800 + i as i64 * 9),
                version: 1,
            }
        })
        .collect();

    comments.push(Comment {
        id: comments.len() as u64 + 1,
        author: USERNAMES[0].to_string(),
        post_id: posts[1].id,
        post_title: posts[1].title.clone(),
        content: "Reminder: please keep threads on topic.".to_string(),
        status: CommentStatus::Visible,
        created_at: at(1200),
        version: 1,
    });
    comments
}

pub fn audit_logs() -> Vec<AuditLog> {
    let actions = AuditAction::ALL;
    (0..48)
        .map(|i| {
            let action = actions[i % actions.len()];
            let outcome = match i % 8 {
                3 => AuditOutcome::Failure,
                6 => AuditOutcome::Denied,
                _ => AuditOutcome::Success,
            };
            let actor = if i % 4 == 0 {
                USERNAMES[0]
            } else {
                USERNAMES[1 + i % 2 * 11]
            };
            AuditLog {
                id: i as u64 + 1,
                actor: actor.to_string(),
                action,
                target: match action {
                    AuditAction::Login | AuditAction::Logout | AuditAction::SettingsChange => {
                        "console".to_string()
                    }
                    AuditAction::PostStatusChange | AuditAction::PostDelete => {
                        format!("post:{}", i % 18 + 1)
                    }
                    AuditAction::CommentStatusChange | AuditAction::CommentDelete => {
                        format!("comment:{}", i % 36 + 1)
                    }
                    AuditAction::RoleChange | AuditAction::UserBan | AuditAction::UserUnban => {
                        format!("user:{}", i % 25 + 1)
                    }
                },
                ip_address: format!("10.0.{}.{}", i % 4, 10 + i % 200),
                outcome,
                created_at: at(1000 + i as i64 * 5),
                version: 1,
            }
        })
        .collect()
}
