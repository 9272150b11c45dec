use bson::{doc, Document};

use mongodb::IndexModel;

use crate::domain::{CommunicationStatus, CommunicationType};

pub const COMMUNICATIONS_COLLECTION: &str = "user_communications";

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

fn string_property(description: &str) -> Document {
    doc! { "bsonType": "string", "description": description }
}

fn string_array_property(description: &str) -> Document {
    doc! {
        "bsonType": "array",
        "description": description,
        "items": { "bsonType": "string" },
    }
}

/// `$jsonSchema` validator enforced by the server on every write
pub fn communication_validator() -> Document {
    let communication_types: Vec<&str> =
        CommunicationType::ALL.iter().map(|t| t.as_str()).collect();
    let statuses: Vec<&str> = CommunicationStatus::ALL.iter().map(|s| s.as_str()).collect();

    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": ["email", "communicationType", "status", "createdAt"],
            "properties": {
                "name": string_property("User's name"),
                "email": {
                    "bsonType": "string",
                    "description": "User's email address",
                    "pattern": EMAIL_PATTERN,
                },
                "institution": string_property("User's educational institution"),
                "phone": string_property("User's phone number"),
                "communicationType": {
                    "enum": communication_types,
                    "description": "Type of communication",
                },
                "resumeLink": string_property("URL to user's resume (if applicable)"),
                "motivation": string_property("User's motivation (for campus ambassador applications)"),
                "message": string_property("Message content for general inquiries"),
                "subject": string_property("Subject of a contact inquiry"),
                "status": {
                    "enum": statuses,
                    "description": "Status of the communication",
                },
                "notes": string_property("Admin notes about this communication"),
                "year": string_property("Year of study (for students)"),
                "interests": string_array_property("User's areas of interest"),
                "skills": string_array_property("User's skills"),
                "createdAt": {
                    "bsonType": "date",
                    "description": "Timestamp when the communication was received",
                },
                "updatedAt": {
                    "bsonType": "date",
                    "description": "Timestamp when the record was last updated",
                },
                "adminResponses": {
                    "bsonType": "array",
                    "description": "History of admin responses to this user",
                    "items": {
                        "bsonType": "object",
                        "required": ["date", "adminId", "message"],
                        "properties": {
                            "date": { "bsonType": "date", "description": "When the response was sent" },
                            "adminId": string_property("ID of the admin who responded"),
                            "message": string_property("Content of the response"),
                        },
                    },
                },
            },
        }
    }
}

/// Ascending indexes created together with the collection
pub fn communication_indexes() -> Vec<IndexModel> {
    ["email", "communicationType", "status", "createdAt"]
        .into_iter()
        .map(|field| IndexModel::builder().keys(doc! { field: 1 }).build())
        .collect()
}
