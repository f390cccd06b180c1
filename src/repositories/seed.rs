//! Demo data
//!
//! The records the client ships with when no backend is attached. Dates are laid out
//! around `anchor` so the active election is open and the completed one is over.

use chrono::{DateTime, Duration, Utc};

use crate::models::election::{Candidate, Election, ElectionStatus};
use crate::models::notification::{Notification, NotificationKind};
use crate::models::request::{ElectionRequest, RequestStatus};

fn candidate(id: &str, name: &str, manifesto: &str, votes: u64, avatar: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: name.to_string(),
        manifesto: manifesto.to_string(),
        votes,
        avatar: Some(avatar.to_string()),
    }
}

pub fn demo_elections(anchor: DateTime<Utc>) -> Vec<Election> {
    vec![
        Election {
            id: "1".to_string(),
            name: "Student Council President 2024".to_string(),
            description: "Annual election for Student Council President".to_string(),
            start_date: anchor - Duration::days(3),
            end_date: anchor + Duration::days(3),
            university: "University of California".to_string(),
            department: "All Departments".to_string(),
            status: ElectionStatus::Active,
            total_votes: 1250,
            candidates: vec![
                candidate(
                    "1",
                    "Sarah Johnson",
                    "Improving campus facilities and student services",
                    650,
                    "https://images.unsplash.com/photo-1494790108755-2616b9c9b1e8?w=100&h=100&fit=crop&crop=face",
                ),
                candidate(
                    "2",
                    "Mike Chen",
                    "Enhanced mental health support and academic resources",
                    600,
                    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop&crop=face",
                ),
            ],
        },
        Election {
            id: "2".to_string(),
            name: "CS Department Representative".to_string(),
            description: "Computer Science Department representative election".to_string(),
            start_date: anchor - Duration::days(18),
            end_date: anchor - Duration::days(11),
            university: "University of California".to_string(),
            department: "Computer Science".to_string(),
            status: ElectionStatus::Completed,
            total_votes: 450,
            candidates: vec![
                candidate(
                    "3",
                    "Alex Rivera",
                    "Better lab equipment and industry partnerships",
                    280,
                    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop&crop=face",
                ),
                candidate(
                    "4",
                    "Emma Thompson",
                    "Improved curriculum and student internship programs",
                    170,
                    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=100&h=100&fit=crop&crop=face",
                ),
            ],
        },
    ]
}

pub fn demo_notifications(anchor: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification {
            id: "1".to_string(),
            message: "Student Council President 2024 results are now available".to_string(),
            timestamp: anchor - Duration::hours(2),
            read: false,
            kind: NotificationKind::Result,
        },
        Notification {
            id: "2".to_string(),
            message: "New election request submitted for approval".to_string(),
            timestamp: anchor - Duration::hours(20) - Duration::minutes(30),
            read: true,
            kind: NotificationKind::Election,
        },
        Notification {
            id: "3".to_string(),
            message: "Voting for CS Department Representative has ended".to_string(),
            timestamp: anchor - Duration::days(11),
            read: true,
            kind: NotificationKind::Election,
        },
    ]
}

pub fn demo_requests(anchor: DateTime<Utc>) -> Vec<ElectionRequest> {
    let today = anchor.date_naive();
    vec![
        ElectionRequest {
            id: "1".to_string(),
            name: "Engineering Society President 2024".to_string(),
            requester: "John Smith".to_string(),
            department: "Engineering".to_string(),
            reason: "Annual election for engineering society leadership".to_string(),
            submitted_date: today - Duration::days(1),
            start_date: None,
            end_date: None,
            status: RequestStatus::Pending,
        },
        ElectionRequest {
            id: "2".to_string(),
            name: "Student Representative - Arts".to_string(),
            requester: "Emily Davis".to_string(),
            department: "Liberal Arts".to_string(),
            reason: "Representative needed for upcoming semester planning".to_string(),
            submitted_date: today - Duration::days(2),
            start_date: None,
            end_date: None,
            status: RequestStatus::Pending,
        },
    ]
}
