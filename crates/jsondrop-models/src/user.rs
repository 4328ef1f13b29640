//! User records seeded by the demo.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::number::FlexNumber;

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: FlexNumber,
}

/// A user record, stored under the `users` collection keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub name: String,
    pub age: FlexNumber,
    pub contact: String,
    pub address: Address,
    pub company: String,
}

impl Address {
    pub fn new(city: &str, state: &str, country: &str, pincode: FlexNumber) -> Self {
        Self {
            city: city.to_string(),
            state: state.to_string(),
            country: country.to_string(),
            pincode,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {} - {}, {}, {} {} - {}",
            self.name,
            self.age,
            self.contact,
            self.address.city,
            self.address.state,
            self.address.country,
            self.address.pincode,
            self.company
        )
    }
}

/// The three sample users written by `jsondrop demo` and `jsondrop seed`.
pub fn demo_users() -> Vec<User> {
    let pincode = FlexNumber::from(560037u32);
    let bangalore = Address::new("Bangalore", "Karnataka", "India", pincode.clone());
    let hyderabad = Address::new("Hyderabad", "Telangana", "India", pincode);

    vec![
        User {
            name: "John".to_string(),
            age: FlexNumber::from(30u32),
            contact: "9079897225".to_string(),
            address: bangalore.clone(),
            company: "Google".to_string(),
        },
        User {
            name: "Mary".to_string(),
            age: FlexNumber::from(25u32),
            contact: "2379492701".to_string(),
            address: hyderabad,
            company: "Meta".to_string(),
        },
        User {
            name: "Peter".to_string(),
            age: FlexNumber::from(35u32),
            contact: "9079897225".to_string(),
            address: bangalore,
            company: "Google".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_field_names() {
        let user = &demo_users()[0];
        let value = serde_json::to_value(user).unwrap();

        assert_eq!(
            value,
            json!({
                "Name": "John",
                "Age": 30,
                "Contact": "9079897225",
                "Address": {
                    "City": "Bangalore",
                    "State": "Karnataka",
                    "Country": "India",
                    "Pincode": 560037
                },
                "Company": "Google"
            })
        );
    }

    #[test]
    fn test_user_accepts_string_numbers() {
        let text = r#"{
            "Name": "Mary",
            "Age": "25",
            "Contact": "2379492701",
            "Address": {"City": "Hyderabad", "State": "Telangana", "Country": "India", "Pincode": "560037"},
            "Company": "Meta"
        }"#;

        let user: User = serde_json::from_str(text).unwrap();
        assert_eq!(user, demo_users()[1]);
    }

    #[test]
    fn test_demo_users_unique_names() {
        let users = demo_users();
        let mut names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_display() {
        let user = &demo_users()[2];
        assert_eq!(
            user.to_string(),
            "Peter (35) 9079897225 - Bangalore, Karnataka, India 560037 - Google"
        );
    }
}
