use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of step a funnel can be assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Sales,
    Order,
    Upsell,
    Downsell,
    ThankYou,
}

/// Static display attributes of a step kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepConfig {
    pub label: &'static str,
    pub default_button_label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl StepType {
    /// Every step kind, in palette order.
    pub const ALL: [StepType; 5] = [
        StepType::Sales,
        StepType::Order,
        StepType::Upsell,
        StepType::Downsell,
        StepType::ThankYou,
    ];

    pub fn config(self) -> &'static StepConfig {
        match self {
            StepType::Sales => &SALES,
            StepType::Order => &ORDER,
            StepType::Upsell => &UPSELL,
            StepType::Downsell => &DOWNSELL,
            StepType::ThankYou => &THANK_YOU,
        }
    }

    pub fn label(self) -> &'static str {
        self.config().label
    }

    /// Wire name used in documents and node ids.
    pub fn as_str(self) -> &'static str {
        match self {
            StepType::Sales => "sales",
            StepType::Order => "order",
            StepType::Upsell => "upsell",
            StepType::Downsell => "downsell",
            StepType::ThankYou => "thankyou",
        }
    }

    /// Whether new steps of this kind get a numbered title ("Upsell 2").
    pub fn is_numbered(self) -> bool {
        matches!(self, StepType::Upsell | StepType::Downsell)
    }

    /// Thank-you steps terminate a funnel and never lead anywhere.
    pub fn can_be_source(self) -> bool {
        !matches!(self, StepType::ThankYou)
    }
}

static SALES: StepConfig = StepConfig {
    label: "Sales Page",
    default_button_label: "Buy Now",
    icon: "ShoppingBag",
    color: "node-sales",
};

static ORDER: StepConfig = StepConfig {
    label: "Checkout",
    default_button_label: "Go to Checkout",
    icon: "CreditCard",
    color: "node-order",
};

static UPSELL: StepConfig = StepConfig {
    label: "Upsell",
    default_button_label: "Yes, add to order",
    icon: "TrendingUp",
    color: "node-upsell",
};

static DOWNSELL: StepConfig = StepConfig {
    label: "Downsell",
    default_button_label: "No thanks",
    icon: "TrendingDown",
    color: "node-downsell",
};

static THANK_YOU: StepConfig = StepConfig {
    label: "Thank You",
    default_button_label: "View order",
    icon: "CheckCircle",
    color: "node-thankyou",
};

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StepType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepType::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| format!("Unknown step type '{}'", s))
    }
}
