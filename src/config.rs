use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Built-in 258x181 png, shown when no placeholder is configured.
pub const DEFAULT_PLACEHOLDER: &str =
    "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAQIAAAC1CAMAAACDKQEbAAAAAXNSR0IB2cksfwAAAAlwSFlzAAALEwAACxMBAJqcGAAAARFQTFRFAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAaF+5TAAAAFt0Uk5TAAMGBzZTXltIHQsvRxkRQSJSJVZNRVlKARMQXVA4GxwsBA5GVB8jWjs6TisCFjRRFypJVUJDXBUkRDA1MSc5BTMyVx5MClgUDEs/Dy4NJgkhLUAoEhg8CCk+T/4CuVYAAAdNSURBVHic7Z1pWxs3EIDXHOIKJI1JMbG5iQmExJSzOahLAhSIS46GBvr/f0gNxsb26pgZza60tt7PgGZf8dg7o5ndKAoEAm3kBvqOjusfHBoW/cfI6FjLwHg/CrhjoqngketI3DHZMDDlOg6HPG4oeOI6Dof80lDw1HUcDskHBUFBUCBRMP2sT/hVqeDhbqnHmQkKgoKgICiIgoIoKIiCgigoiIKCKCiIgoIoKIiCgigoiKgKCuOzs7PPc6lEmDgEBc8nRkfufqJYmpsvpBVocqAVLLR+o/Fri0vpBZsMSAXLK6Kb1RdpxpsAOAXltZiBOi+z/Y+AUVBYlwmoszGectSsYBTMKQwIURpMOWxOEApeKQ0IMbqZduB8wBW8LmoUiDepR84GWEGuojMgxFb6sTMBVvCb3oDYTj92JqAKcjsGBc0ejewBVWBuvdh1ED0LUAV7RgX7Wf1iBCrIjRgViKzeKAMVHJgNZPZ7Eajgd4CCty7iZwCo4B1AQclF/AwAFbwBKNhxET8DQAXvAQryLuJnAKjgA0BBxUX8DAAVHAIUrLiInwGggkmAgj9cxM8AUEF136yg7CJ+BqA3yNtmBVmtnkEVmD8MsvpRAFYwKK0dt/PEQfQsgEsmfxoMVBI8V1paWDw6XE7qr4MVDH7UK/iUVITRwPtGl/DxfDJ/H14+1RdNHicTXp2th3rV7kkSCyCK6KqDlFuGE6uXvGivVKzOJrACQkEufp7Y5PR5AqHdsdV5Q7KWgAPMaVL1mcJA/i/+wBqcdX8C7Zyxr4E6Vt0ckho45w+rueBMbLEZ9nMr5OH62Gospv2j5LpNZGUK9voctsWiOnHaEVDx4jN3SA/MS//puL8b8Y021fJu806xOFP7mzmedk7yUgV55q9GUrvV5tSny8vL8sGA+kcYKKi+gVZ4b0Q9brpTl2zfsa7jr4JJ9WF+kfX80lsFX+QfBPfBfmFcyVsF+kPMPcaVfFWg6+q55RXfUp4qODDVKvcP2NbyU8GAoaunToXtG9lPBRdGA0JccC3mpQLYEwSeMq3mo4IpQD9HnZEpnuU8VLC0ATIgxAZP77OHCtR9vt3Msaznn4KvYANCfOVY0DsFZ6cIBacc9SrfFEhKZTo4ymi+KTAdWnVzZL+kZwoWkAaEWLBe0y8FilKZDvu82SsFBcqTBq3LaF4p+EYwIMQ3y1V9UqCfe1FSfG23rEcKBuPHNDAsz3Q9UrBLNCDEd6t1/VHwD9mAEIc2C3uj4AcsQ5Yz8sNiZV8UVM2lMh2lKn1pXxS8tDIgxDp9aU8U2D94l97z54eCz8auRiNr5Ka8JBRcrR9Xpv9dgN+4IjNkOdvUvJlfwVSzXfkYfNeGzZDlUPNmdgXtTXJzsI2RN5OgoZ43cysod9znP4Ic+WjPkDHkf5JCZlbQ3RRwbv6+LowyGagbJ+XNvAriJQ9zYy4tQ5azSIiZV4Hsk90UlaaZBE/xCh80rwLZHFtRfwrO9kHQYJWQN3MqkG+oPps3T8TjILSfMCpQbagumzc9GwPPtUMFhbeqqNTZvLGZBA8+b+ZToO4OUkYFaCbBU8HmzWwKDjSf7KpsHtJMgufGkYJB7euW5Nl8Uq+jQM6McikwbKgsmwc2k+BZwzXHMym4NEUVz+bBzSR4plETEjwKzBt6Hksa4c0keIZSV7D0nzmq7mESTDMJHsz+sSgAbWjn30M1k+A5RcyQcyiAbWjHMAlLqUwHov2EQQF0Q9uz+SPuS44BH9uwVwDf0Frrd/DNJGjgZTR7BfDaZyubJzST4AG3n1grwGzofTavnLviBZo32yrAbWjjgYCcpTIdwLENSwXYDb3N5onNJHiAYxuWCrAbWs+b9QkVK7CxDTsF+A2tVOnNJHhAYxtWCiglj2mWa4MCyZutFHxP9XIoQMY2bBRAHnzmGsDYhoUCq+6g1DCPbdAVVEtOLgmNcWyDrkD3gBufMI5tkBVk57XcpryZqmDZvjsoNQztJ0QFm+dOLoaIfmyDqADyRFx/0OfNNAVjTq6EjnZsg6TgxPDUO//QjW1QFJDmZ9yiG9ugKKg5uQo7NI0eBAVXaZU8WFE3euAVkOdnHKNs9MAr4O4OSgtlowdawbWT+DlQNXpgFWQjQ5ajGNtAKrCcn3GMfGwDqcB2fsYt8rEN5PsUXQTOSLzRA6uAYX7GMbKnhmIU5NItgCeCZGMxCiAvTPGdj/GnhiIUZC1DlhMf24ArGD91ETE/NbICxvkZt8TGNsAKIO/PygbdYxtQBazzM47ZIyn4mUZ3UGpcUxRkNUOW05k3wxTwz8+4pWNsA6QggfkZx9wgFWQ7Q5ZTxim4cRJksrSNbQAUQF4qmj0exjbMCrKfIcsZAivI1hkyhnmogqXZXmUZqqD3CQqCgqAgCgoinYLaZJ9QUiroP4KCoCAoEC0FvZkWwthpKEhhjtRbjhsKBno0NYbw4f5GodcqpXCGWyN9tZ6rlcLYaGtBOTtc7EMQzyntaf4HFD63JcK85RcAAAAASUVORK5CYII=";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyOptions {
    /// Shown while the target resource is pending.
    pub loading: String,
    /// Shown when the fetch fails.
    pub error: String,
    /// Origin relative sources are anchored at.
    pub origin: Option<String>,
}

impl LazyOptions {
    pub fn new(loading: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            loading: loading.into(),
            error: error.into(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn placeholders(&self) -> Placeholders {
        Placeholders {
            loading: or_default(&self.loading),
            error: or_default(&self.error),
        }
    }
}

fn or_default(value: &str) -> Rc<str> {
    if value.is_empty() {
        Rc::from(DEFAULT_PLACEHOLDER)
    } else {
        Rc::from(value)
    }
}

/// Placeholder sources resolved once per coordinator and shared by every
/// manager it creates.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholders {
    pub loading: Rc<str>,
    pub error: Rc<str>,
}

impl Default for Placeholders {
    fn default() -> Self {
        LazyOptions::default().placeholders()
    }
}
